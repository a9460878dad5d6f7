mod estimator_tests;
mod format_tests;
mod summary_tests;

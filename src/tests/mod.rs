mod market_tests;
mod session_tests;
mod validation_tests;

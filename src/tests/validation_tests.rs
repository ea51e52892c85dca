use crate::utils::Validator;

#[test]
fn test_validate_symbol() {
    // Valid symbols
    assert!(Validator::validate_symbol("AAPL").is_ok());
    assert!(Validator::validate_symbol("BRK.B").is_ok());
    assert!(Validator::validate_symbol("BTC-USD").is_ok());
    assert!(Validator::validate_symbol("A").is_ok());

    // Invalid symbols
    assert!(Validator::validate_symbol("").is_err());
    assert!(Validator::validate_symbol("aapl").is_err());
    assert!(Validator::validate_symbol("AA PL").is_err());
    assert!(Validator::validate_symbol(".AAPL").is_err());
    assert!(Validator::validate_symbol(&"X".repeat(30)).is_err());
}

#[test]
fn test_validate_symbols_batch() {
    let batch: Vec<String> = vec!["AAPL".to_string(), "TSLA".to_string()];
    assert!(Validator::validate_symbols(&batch).is_ok());

    assert!(Validator::validate_symbols(&[]).is_err());

    let too_many: Vec<String> = (0..150).map(|i| format!("SYM{}", i)).collect();
    assert!(Validator::validate_symbols(&too_many).is_err());

    let with_bad = vec!["AAPL".to_string(), "bad".to_string()];
    assert!(Validator::validate_symbols(&with_bad).is_err());
}

#[test]
fn test_validate_email() {
    assert!(Validator::validate_email("user@example.com").is_ok());
    assert!(Validator::validate_email("a.b+c@sub.domain.org").is_ok());

    assert!(Validator::validate_email("").is_err());
    assert!(Validator::validate_email("user").is_err());
    assert!(Validator::validate_email("user@nodot").is_err());
    assert!(Validator::validate_email("user @example.com").is_err());
}

#[test]
fn test_validate_password() {
    assert!(Validator::validate_password("hunter2x").is_ok());
    assert!(Validator::validate_password("short").is_err());
}

//! Property-based tests for destination validation

use super::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn valid_numbers_accepted(plus in any::<bool>(), first in 1u8..=9, rest in "[0-9]{6,14}") {
        let number = format!("{}{first}{rest}", if plus { "+" } else { "" });
        prop_assert!(is_valid_phone_number(&number));
    }

    #[test]
    fn leading_zero_rejected(rest in "[0-9]{1,14}") {
        let with_plus = format!("+0{rest}");
        let without_plus = format!("0{rest}");
        prop_assert!(!is_valid_phone_number(&with_plus));
        prop_assert!(!is_valid_phone_number(&without_plus));
    }

    #[test]
    fn non_digits_rejected(prefix in "[1-9][0-9]{0,5}", junk in "[a-zA-Z *#-]{1,4}", suffix in "[0-9]{0,5}") {
        let number = format!("{prefix}{junk}{suffix}");
        prop_assert!(!is_valid_phone_number(&number));
    }

    #[test]
    fn too_short_rejected(plus in any::<bool>(), first in 1u8..=9, rest in "[0-9]{0,5}") {
        let number = format!("{}{first}{rest}", if plus { "+" } else { "" });
        prop_assert!(!is_valid_phone_number(&number));
    }

    #[test]
    fn too_long_rejected(first in 1u8..=9, rest in "[0-9]{15,20}") {
        let number = format!("+{first}{rest}");
        prop_assert!(!is_valid_phone_number(&number));
    }

    #[test]
    fn malformed_rejected_before_delivery(to in "[a-z]{0,8}") {
        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let notifier = SmsNotifier::new(None, "+15005550006", Duration::from_secs(1));
        let receipt = rt.block_on(notifier.send_sms(&to, "corpo"));
        prop_assert!(matches!(receipt, SmsReceipt::InvalidNumber | SmsReceipt::MissingContent));
    }
}

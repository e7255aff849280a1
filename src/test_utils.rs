//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Pick an address from a small pool so generated transfers collide
    pub fn address() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("QUxJQ0U=".to_string()),
            Just("Qk9C".to_string()),
            Just("Q0FST0w=".to_string()),
        ]
    }

    /// Generate a sequence of `(sender, receiver, amount)` transfers
    pub fn transfers() -> impl Strategy<Value = Vec<(String, String, u64)>> {
        prop::collection::vec((address(), address(), 0u64..600), 0..20)
    }

    /// Generate a valid key name
    pub fn key_name() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_-]{1,64}"
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::config::defaults::MIN_PROPTEST_ITERATIONS;
    use crate::infra::keystore::is_valid_key_name;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(MIN_PROPTEST_ITERATIONS))]

        #[test]
        fn test_address_generator_is_base64(addr in address()) {
            prop_assert!(crate::core::encoding::decode(&addr, "address").is_ok());
        }

        #[test]
        fn test_transfers_generator_bounds(steps in transfers()) {
            prop_assert!(steps.len() < 20);
            for (_, _, amount) in steps {
                prop_assert!(amount < 600);
            }
        }

        #[test]
        fn test_generated_key_names_are_accepted(name in key_name()) {
            prop_assert!(is_valid_key_name(&name));
        }
    }
}

//! Method naming

use heck::ToLowerCamelCase;

/// camelCase transform applied to declared message and argument names
///
/// `get_value` becomes `getValue`; already camelCased names are unchanged.
pub fn camel_case(name: &str) -> String {
    name.to_lower_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("get_value"), "getValue");
        assert_eq!(camel_case("inc"), "inc");
        assert_eq!(camel_case("total-supply"), "totalSupply");
        assert_eq!(camel_case("balanceOf"), "balanceOf");
        assert_eq!(camel_case("Transfer_from"), "transferFrom");
    }
}

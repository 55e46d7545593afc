use anyhow::Context;
use serde_json::Value;
use woodcore_sdk::Params;

/// Parse one `name=value` argument. The value is read as JSON when it
/// parses, otherwise it is taken verbatim as a string.
pub fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((name.to_owned(), value))
}

/// Build call params from an optional JSON object, then apply `name=value`
/// pairs over it.
pub fn build_params(json: Option<&str>, pairs: Vec<(String, Value)>) -> anyhow::Result<Params> {
    let mut params = match json {
        Some(raw) => {
            let value = serde_json::from_str(raw).context("--json is not valid JSON")?;
            Params::from_json(value)?
        }
        None => Params::new(),
    };
    for (name, value) in pairs {
        params.insert(name, value);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_values_are_typed() {
        assert_eq!(parse_param("perPage=25").unwrap(), ("perPage".into(), json!(25)));
        assert_eq!(parse_param("activate=true").unwrap().1, json!(true));
        assert_eq!(
            parse_param(r#"credits=[{"glAccountId":1,"amount":50}]"#).unwrap().1,
            json!([{"glAccountId": 1, "amount": 50}])
        );
    }

    #[test]
    fn test_other_values_are_strings() {
        assert_eq!(
            parse_param("transactionDate=12 March 2024").unwrap().1,
            json!("12 March 2024")
        );
        assert_eq!(parse_param("accountNo=").unwrap().1, json!(""));
        assert_eq!(parse_param("sortBy=a=b").unwrap().1, json!("a=b"));
    }

    #[test]
    fn test_pairs_override_json_object() {
        let params = build_params(
            Some(r#"{"loanAccountId": 3, "note": "from json"}"#),
            vec![("note".to_owned(), json!("from pair"))],
        )
        .unwrap();
        assert_eq!(params.get("loanAccountId"), Some(&json!(3)));
        assert_eq!(params.get("note"), Some(&json!("from pair")));

        let pairs_only = build_params(None, vec![("perPage".to_owned(), json!(5))]).unwrap();
        assert_eq!(pairs_only.get("perPage"), Some(&json!(5)));
    }

    #[test]
    fn test_json_must_be_an_object() {
        assert!(build_params(Some("[1, 2]"), Vec::new()).is_err());
        assert!(build_params(Some("{not json"), Vec::new()).is_err());
    }

    #[test]
    fn test_malformed_params_are_rejected() {
        assert!(parse_param("perPage").is_err());
        assert!(parse_param("=5").is_err());
    }
}

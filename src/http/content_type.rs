//! `Content-Type` charset extraction.

/// Extract the `charset` parameter from a `Content-Type` header value.
///
/// ```text
/// text/html; charset=utf-8       -> Some("utf-8")
/// text/html; Charset="UTF-8"     -> Some("UTF-8")
/// application/json               -> None
/// text/html; charset=            -> None
/// ```
pub fn charset_param(value: &str) -> Option<&str> {
    value.split(';').skip(1).find_map(|param| {
        let (name, raw) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let raw = raw.trim();
        let charset = raw
            .strip_prefix('"')
            .map(|quoted| quoted.split('"').next().unwrap_or(quoted))
            .unwrap_or(raw)
            .trim();
        (!charset.is_empty()).then_some(charset)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_param_table() {
        let cases: &[(&str, Option<&str>, &str)] = &[
            ("text/html; charset=utf-8", Some("utf-8"), "plain charset"),
            ("text/html; charset=\"UTF-8\"", Some("UTF-8"), "quoted charset"),
            ("text/html;CHARSET=koi8-r", Some("koi8-r"), "upper-case name, no space"),
            ("text/html; format=flowed; charset=iso-8859-1", Some("iso-8859-1"), "later param"),
            ("text/html; charset = utf-8 ", Some("utf-8"), "spaced"),
            ("application/json", None, "no charset param"),
            ("text/html; charset=", None, "empty charset value"),
            ("text/html; charset=\"\"", None, "empty quoted charset value"),
            ("text/html; xcharset=utf-8", None, "different param"),
            ("charset=utf-8", None, "no media type"),
        ];

        for &(content_type, expected, desc) in cases {
            assert_eq!(charset_param(content_type), expected, "{desc}");
        }
    }
}

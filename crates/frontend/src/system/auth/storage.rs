use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

/// Cookie written by the ERP sign-in page.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Value of `name` in a `document.cookie` string.
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| {
            urlencoding::decode(value.trim())
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.trim().to_string())
        })
        .filter(|value| !value.is_empty())
}

/// Get access token from the `access_token` cookie
pub fn get_access_token() -> Option<String> {
    let document = window()?.document()?.dyn_into::<HtmlDocument>().ok()?;
    let cookies = document.cookie().ok()?;
    parse_cookie(&cookies, ACCESS_TOKEN_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie() {
        let cookies = "theme=dark; access_token=eyJhbGci.abc.def; lang=en";
        assert_eq!(
            parse_cookie(cookies, "access_token"),
            Some("eyJhbGci.abc.def".to_string())
        );
        assert_eq!(parse_cookie(cookies, "missing"), None);
    }

    #[test]
    fn test_parse_cookie_empty_and_encoded() {
        assert_eq!(parse_cookie("access_token=", "access_token"), None);
        assert_eq!(parse_cookie("", "access_token"), None);
        assert_eq!(
            parse_cookie("access_token=a%20b", "access_token"),
            Some("a b".to_string())
        );
        // prefix of another cookie name must not match
        assert_eq!(parse_cookie("my_access_token=x", "access_token"), None);
    }
}

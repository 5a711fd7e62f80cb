use percent_encoding::percent_decode;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace("&", "&amp;")
        .replace("<", "&lt;")
        .replace(">", "&gt;")
        .replace("\"", "&#34;")
        .replace("'", "&#39;")
}

/// Escape HTML attribute values
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// First value of `key` in an `application/x-www-form-urlencoded` payload,
/// decoded to raw bytes (`+` is a space, no UTF-8 requirement)
pub fn form_value(encoded: &[u8], key: &str) -> Option<Vec<u8>> {
    encoded
        .split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (name, value) = match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, &pair[pair.len()..]),
            };
            (decode_form_component(name) == key.as_bytes()).then(|| decode_form_component(value))
        })
}

fn decode_form_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw.iter().map(|&b| if b == b'+' { b' ' } else { b }).collect();
    percent_decode(&spaced).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_value_keeps_raw_bytes() {
        assert_eq!(form_value(b"body=%FF%FE", "body"), Some(vec![0xFF, 0xFE]));
        assert_eq!(form_value(b"body=caf%C3%A9+au+lait", "body"), Some("café au lait".as_bytes().to_vec()));
        assert_eq!(form_value(b"body=1+%2B+1", "body"), Some(b"1 + 1".to_vec()));
    }

    #[test]
    fn form_value_takes_first_match() {
        assert_eq!(form_value(b"title=x&body=a&body=b", "body"), Some(b"a".to_vec()));
        assert_eq!(form_value(b"b%6Fdy=encoded-key", "body"), Some(b"encoded-key".to_vec()));
        assert_eq!(form_value(b"&&body&other=1", "body"), Some(Vec::new()));
        assert_eq!(form_value(b"other=1", "body"), None);
        assert_eq!(form_value(b"", "body"), None);
    }

    #[test]
    fn escapes_ampersand_first() {
        assert_eq!(escape_html("a&lt;b"), "a&amp;lt;b");
        assert_eq!(escape_html("<\"x\" & 'y'>"), "&lt;&#34;x&#34; &amp; &#39;y&#39;&gt;");
    }
}

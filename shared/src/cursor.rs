use crate::core::ProductKey;

// The catalog table is keyed on a single string, so the opaque cursor a
// client passes back as `lastKey` is exactly that value.

pub fn encode(token: Option<&ProductKey>) -> Option<String> {
    token.map(|key| key.id.clone())
}

pub fn decode(cursor: Option<&str>) -> Option<ProductKey> {
    cursor.filter(|c| !c.is_empty()).map(ProductKey::new)
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::core::ProductKey;

    #[test]
    fn when_token_present_should_round_trip() {
        let token = ProductKey::new("prod-42");

        let cursor = encode(Some(&token));

        assert_eq!(cursor.as_deref(), Some("prod-42"));
        assert_eq!(decode(cursor.as_deref()), Some(token));
    }

    #[test]
    fn when_token_absent_should_encode_none() {
        assert_eq!(encode(None), None);
    }

    #[test]
    fn when_cursor_absent_should_decode_none() {
        assert_eq!(decode(None), None);
    }

    #[test]
    fn when_cursor_empty_should_decode_none() {
        assert_eq!(decode(Some("")), None);
    }
}

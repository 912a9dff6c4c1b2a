//! XML rendering and parsing for carrier wire models
//!
//! Carriers hand a request model plus its root element name to `render`
//! and get parsed response models back from `parse`. Optional blocks are
//! expressed in the models with `Option`/`Vec` and `skip_serializing_if`,
//! so absent blocks never reach the wire as empty elements.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::CarrierError;

const XML_DECLARATION: &str = "<?xml version=\"1.0\"?>";

/// Serialize a request model under the given root element
pub fn render<T: Serialize>(root: &str, model: &T) -> Result<String, CarrierError> {
    let body = quick_xml::se::to_string_with_root(root, model)?;
    Ok(format!("{}{}", XML_DECLARATION, body))
}

/// Name of the document's root element
pub fn root_name(bytes: &[u8]) -> Result<String, CarrierError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Ok(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) => {
                return Err(CarrierError::Parse("document has no root element".to_string()))
            }
            Ok(_) => {}
            Err(e) => return Err(CarrierError::Parse(e.to_string())),
        }
        buf.clear();
    }
}

/// Parse a response model, requiring the expected root element
pub fn parse<T: DeserializeOwned>(expected_root: &str, bytes: &[u8]) -> Result<T, CarrierError> {
    let root = root_name(bytes)?;
    if root != expected_root {
        return Err(CarrierError::Parse(format!(
            "expected <{}> but found <{}>",
            expected_root, root
        )));
    }
    parse_any(bytes)
}

/// Parse a response model without checking the root element
pub fn parse_any<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CarrierError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| CarrierError::Parse(format!("response is not UTF-8: {}", e)))?;
    Ok(quick_xml::de::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Probe {
        code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        item: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Reply {
        value: f64,
    }

    #[test]
    fn test_render_omits_absent_blocks() {
        let xml = render(
            "Probe",
            &Probe {
                code: "01".to_string(),
                note: None,
                item: Vec::new(),
            },
        )
        .unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<Code>01</Code>"));
        assert!(!xml.contains("Note"));
        assert!(!xml.contains("Item"));
    }

    #[test]
    fn test_root_name_skips_declaration() {
        let root = root_name(b"<?xml version=\"1.0\"?>\n<Reply><Value>1</Value></Reply>").unwrap();
        assert_eq!(root, "Reply");
    }

    #[test]
    fn test_parse_rejects_unexpected_root() {
        let result: Result<Reply, _> = parse("Reply", b"<Error><Value>1</Value></Error>");
        assert!(matches!(result, Err(CarrierError::Parse(_))));
    }

    #[test]
    fn test_parse_missing_field_is_error() {
        let result: Result<Reply, _> = parse("Reply", b"<Reply></Reply>");
        assert!(matches!(result, Err(CarrierError::Parse(_))));
    }

    #[test]
    fn test_parse_value() {
        let reply: Reply = parse("Reply", b"<Reply><Value>22.10</Value></Reply>").unwrap();
        assert_eq!(reply.value, 22.10);
    }

    #[test]
    fn test_empty_document() {
        assert!(root_name(b"   ").is_err());
    }
}

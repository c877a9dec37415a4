use crate::utils::error::Result;
use prost::Message;
use serde::{Deserialize, Serialize};

/// Alertmanager configuration of a single tenant.
///
/// Stored objects use the protobuf encoding of this message, so configs
/// written by other alertmanager deployments sharing the bucket stay readable.
#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
pub struct AlertConfigDesc {
    #[prost(string, tag = "1")]
    pub user: String,
    #[prost(string, tag = "2")]
    pub raw_config: String,
    #[prost(message, repeated, tag = "3")]
    #[serde(default)]
    pub templates: Vec<TemplateDesc>,
}

#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
pub struct TemplateDesc {
    #[prost(string, tag = "1")]
    pub filename: String,
    #[prost(string, tag = "2")]
    pub body: String,
}

impl AlertConfigDesc {
    pub fn new(user: impl Into<String>, raw_config: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            raw_config: raw_config.into(),
            templates: Vec::new(),
        }
    }

    pub fn with_template(mut self, filename: impl Into<String>, body: impl Into<String>) -> Self {
        self.templates.push(TemplateDesc {
            filename: filename.into(),
            body: body.into(),
        });
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        Ok(Self::decode(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_known_wire_bytes() {
        // user="u1", raw_config="r", templates=[{filename="t", body="b"}]
        let wire = [
            0x0a, 0x02, b'u', b'1', 0x12, 0x01, b'r', 0x1a, 0x06, 0x0a, 0x01, b't', 0x12, 0x01,
            b'b',
        ];
        let cfg = AlertConfigDesc::from_bytes(&wire).unwrap();
        assert_eq!(cfg, AlertConfigDesc::new("u1", "r").with_template("t", "b"));
        assert_eq!(cfg.to_bytes(), wire.to_vec());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(AlertConfigDesc::from_bytes(&[0xff, 0xff, 0xff]).is_err());
    }
}

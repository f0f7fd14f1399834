use std::fmt;

/// Describes who sends a transaction and where it goes.
///
/// A missing `to` makes the transaction a contract creation. `private_for` restricts the
/// transaction to the listed participants; it is forwarded to the node untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TransactionParam {
    pub from: String,
    pub password: String,
    pub to: Option<String>,
    pub private_for: Option<Vec<String>>,
}

impl TransactionParam {
    pub fn new(from: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn private_for(mut self, participants: Vec<String>) -> Self {
        self.private_for = Some(participants);
        self
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

impl fmt::Debug for TransactionParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionParam")
            .field("from", &self.from)
            .field("password", &"<redacted>")
            .field("to", &self.to)
            .field("private_for", &self.private_for)
            .finish()
    }
}

/// The object sent as the sole parameter of `eth_sendTransaction`.
///
/// An empty `to` or an empty participant list is left out of the payload: any `privateFor`
/// key, even `[]`, makes Quorum treat the transaction as private.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTxPayload {
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub data: String,
    pub gas: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_for: Option<Vec<String>>,
}

impl SendTxPayload {
    /// Assembles the wire payload for `param` carrying the encoded `data`.
    pub fn new(param: &TransactionParam, data: String, gas: impl Into<String>) -> Self {
        Self {
            from: param.from.clone(),
            to: param.to.clone().filter(|to| !to.is_empty()),
            data,
            gas: gas.into(),
            private_for: param
                .private_for
                .clone()
                .filter(|participants| !participants.is_empty()),
        }
    }
}

/// The message object of a read-only `eth_call`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPayload {
    pub to: String,
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn private_payload_keeps_participants() {
        let param = TransactionParam::new("0xfrom", "pw")
            .to("0xto")
            .private_for(vec!["p1".to_string(), "p2".to_string(), "p1".to_string()]);
        let payload = SendTxPayload::new(&param, "0x1234".to_string(), "0x1312d00");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "from": "0xfrom",
                "to": "0xto",
                "data": "0x1234",
                "gas": "0x1312d00",
                "privateFor": ["p1", "p2", "p1"],
            })
        );
    }

    #[test]
    fn creation_payload_omits_optional_fields() {
        let param = TransactionParam::new("0xfrom", "");
        assert!(param.is_contract_creation());
        let payload = SendTxPayload::new(&param, "0x6060".to_string(), "0x1312d00");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "from": "0xfrom", "data": "0x6060", "gas": "0x1312d00" })
        );
    }

    #[test]
    fn empty_recipient_and_participants_are_omitted() {
        let param = TransactionParam::new("0xfrom", "")
            .to("")
            .private_for(vec![]);
        let payload = SendTxPayload::new(&param, "0x6060".to_string(), "0x1312d00");
        assert_eq!(payload.to, None);
        assert_eq!(payload.private_for, None);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "from": "0xfrom", "data": "0x6060", "gas": "0x1312d00" })
        );
    }

    #[test]
    fn debug_hides_password() {
        let param = TransactionParam::new("0xfrom", "hunter2");
        assert!(!format!("{:?}", param).contains("hunter2"));
    }
}

//! Update operations and per-object messages.

use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, EncodeResult, LimitKind, WireResult};
use crate::limits::Limits;
use crate::value::WireValue;

/// A single update operation addressed to one remote object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Operation {
    /// Set a property to an encoded value.
    Set { name: String, value: WireValue },
    /// Attach (`true`) or detach (`false`) a client-side listener.
    Listen { name: String, attached: bool },
}

impl Operation {
    /// Returns the property or listener name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Set { name, .. } | Self::Listen { name, .. } => name,
        }
    }

    const fn is_set(&self) -> bool {
        matches!(self, Self::Set { .. })
    }
}

/// Emission target for one object's operations.
///
/// Implementations must keep at most one operation per property and per
/// listener: a later write replaces the earlier one.
pub trait OutboundChannel {
    /// Sets a property to an already encoded value.
    fn set_property(&mut self, name: &str, value: WireValue) -> EncodeResult<()>;

    /// Announces that the server is interested in `name` events.
    fn add_listener(&mut self, name: &str) -> EncodeResult<()>;

    /// Announces that the server is no longer interested in `name` events.
    fn remove_listener(&mut self, name: &str) -> EncodeResult<()>;
}

/// The ordered operations for one object in one request cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMessage {
    pub target: String,
    pub operations: Vec<Operation>,
    #[serde(skip)]
    limits: Limits,
}

impl ObjectMessage {
    /// Creates an empty message for `target` with default limits.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self::with_limits(target, Limits::default())
    }

    /// Creates an empty message for `target`.
    #[must_use]
    pub fn with_limits(target: impl Into<String>, limits: Limits) -> Self {
        Self {
            target: target.into(),
            operations: Vec::new(),
            limits,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns the value set for `name`, if any.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&WireValue> {
        self.operations.iter().find_map(|op| match op {
            Operation::Set { name: n, value } if n == name => Some(value),
            _ => None,
        })
    }

    /// Returns the listener toggle for `name`, if any.
    #[must_use]
    pub fn listener(&self, name: &str) -> Option<bool> {
        self.operations.iter().find_map(|op| match op {
            Operation::Listen { name: n, attached } if n == name => Some(*attached),
            _ => None,
        })
    }

    fn upsert(&mut self, op: Operation) -> EncodeResult<()> {
        let existing = self
            .operations
            .iter_mut()
            .find(|current| current.is_set() == op.is_set() && current.name() == op.name());
        if let Some(slot) = existing {
            *slot = op;
            return Ok(());
        }
        if self.operations.len() >= self.limits.max_operations_per_message {
            return Err(EncodeError::LimitsExceeded {
                kind: LimitKind::OperationsPerMessage,
                limit: self.limits.max_operations_per_message,
                actual: self.operations.len() + 1,
            });
        }
        self.operations.push(op);
        Ok(())
    }

    fn listen(&mut self, name: &str, attached: bool) -> EncodeResult<()> {
        self.upsert(Operation::Listen {
            name: name.to_owned(),
            attached,
        })
    }
}

impl OutboundChannel for ObjectMessage {
    fn set_property(&mut self, name: &str, value: WireValue) -> EncodeResult<()> {
        if let Some(len) = value.array_len() {
            if len > self.limits.max_array_len {
                return Err(EncodeError::LimitsExceeded {
                    kind: LimitKind::ArrayLength,
                    limit: self.limits.max_array_len,
                    actual: len,
                });
            }
        }
        self.upsert(Operation::Set {
            name: name.to_owned(),
            value,
        })
    }

    fn add_listener(&mut self, name: &str) -> EncodeResult<()> {
        self.listen(name, true)
    }

    fn remove_listener(&mut self, name: &str) -> EncodeResult<()> {
        self.listen(name, false)
    }
}

/// All object messages produced by one request cycle, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    pub cycle: u32,
    pub objects: Vec<ObjectMessage>,
}

impl Message {
    #[must_use]
    pub const fn new(cycle: u32) -> Self {
        Self {
            cycle,
            objects: Vec::new(),
        }
    }

    /// Returns the message for `target`, if it emitted anything.
    #[must_use]
    pub fn object(&self, target: &str) -> Option<&ObjectMessage> {
        self.objects.iter().find(|msg| msg.target == target)
    }

    /// Total number of operations across all objects.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.objects.iter().map(ObjectMessage::len).sum()
    }
}

/// Encodes a message as a JSON document.
pub fn encode_message(message: &Message) -> WireResult<String> {
    Ok(serde_json::to_string(message)?)
}

/// Decodes a JSON message document, enforcing `limits`.
///
/// Each object is rebuilt operation by operation, so repeated writes for the
/// same key collapse to the last one exactly as they do while encoding.
pub fn decode_message(json: &str, limits: &Limits) -> WireResult<Message> {
    let raw: Message = serde_json::from_str(json)?;
    let mut objects = Vec::with_capacity(raw.objects.len());
    for object in raw.objects {
        let mut rebuilt = ObjectMessage::with_limits(object.target, limits.clone());
        for op in object.operations {
            match op {
                Operation::Set { name, value } => rebuilt.set_property(&name, value)?,
                Operation::Listen { name, attached } => rebuilt.listen(&name, attached)?,
            }
        }
        objects.push(rebuilt);
    }
    Ok(Message {
        cycle: raw.cycle,
        objects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn later_set_overwrites_in_place() {
        let mut msg = ObjectMessage::new("w1");
        msg.set_property("text", "a".into()).unwrap();
        msg.set_property("enabled", false.into()).unwrap();
        msg.set_property("text", "b".into()).unwrap();

        assert_eq!(msg.len(), 2);
        assert_eq!(msg.operations[0].name(), "text");
        assert_eq!(msg.property("text"), Some(&WireValue::from("b")));
    }

    #[test]
    fn listener_toggle_overwrites() {
        let mut msg = ObjectMessage::new("w1");
        msg.add_listener("selection").unwrap();
        msg.remove_listener("selection").unwrap();
        assert_eq!(msg.len(), 1);
        assert_eq!(msg.listener("selection"), Some(false));
    }

    #[test]
    fn set_and_listen_with_same_name_are_distinct() {
        let mut msg = ObjectMessage::new("w1");
        msg.set_property("help", true.into()).unwrap();
        msg.add_listener("help").unwrap();
        assert_eq!(msg.len(), 2);
    }

    #[test]
    fn operation_limit_enforced() {
        let limits = Limits {
            max_operations_per_message: 2,
            ..Limits::for_testing()
        };
        let mut msg = ObjectMessage::with_limits("w1", limits);
        msg.set_property("a", WireValue::Int(1)).unwrap();
        msg.set_property("b", WireValue::Int(2)).unwrap();
        // Overwrites never count against the limit.
        msg.set_property("a", WireValue::Int(3)).unwrap();
        let err = msg.set_property("c", WireValue::Int(4)).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::LimitsExceeded {
                kind: LimitKind::OperationsPerMessage,
                ..
            }
        ));
    }

    #[test]
    fn array_limit_enforced() {
        let limits = Limits {
            max_array_len: 2,
            ..Limits::for_testing()
        };
        let mut msg = ObjectMessage::with_limits("w1", limits);
        let value = WireValue::Array(vec![WireValue::Null; 3]);
        let err = msg.set_property("colors", value).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::LimitsExceeded {
                kind: LimitKind::ArrayLength,
                limit: 2,
                actual: 3,
            }
        ));
        assert!(msg.is_empty());
    }

    #[test]
    fn message_json_shape() {
        let mut obj = ObjectMessage::new("w1");
        obj.set_property("toolTip", "Hi".into()).unwrap();
        obj.add_listener("help").unwrap();
        let mut message = Message::new(3);
        message.objects.push(obj);

        let json = encode_message(&message).unwrap();
        assert_eq!(
            json,
            r#"{"cycle":3,"objects":[{"target":"w1","operations":[{"action":"set","name":"toolTip","value":"Hi"},{"action":"listen","name":"help","attached":true}]}]}"#
        );

        let decoded = decode_message(&json, &Limits::default()).unwrap();
        assert_eq!(decoded, message);
        assert_eq!(decoded.operation_count(), 2);
    }

    #[test]
    fn decode_rejects_oversized_object() {
        let mut obj = ObjectMessage::new("w1");
        for idx in 0..4i64 {
            obj.set_property(&format!("p{idx}"), WireValue::Int(idx)).unwrap();
        }
        let mut message = Message::new(1);
        message.objects.push(obj);
        let json = encode_message(&message).unwrap();

        let limits = Limits {
            max_operations_per_message: 3,
            ..Limits::for_testing()
        };
        let err = decode_message(&json, &limits).unwrap_err();
        assert!(matches!(err, DecodeError::LimitsExceeded { .. }));
    }

    #[test]
    fn decode_collapses_repeated_keys() {
        let json = r#"{"cycle":1,"objects":[{"target":"w1","operations":[
            {"action":"set","name":"text","value":"a"},
            {"action":"listen","name":"help","attached":true},
            {"action":"set","name":"text","value":"b"},
            {"action":"listen","name":"help","attached":false}
        ]}]}"#;
        let message = decode_message(json, &Limits::default()).unwrap();
        let object = message.object("w1").unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object.operations[0].name(), "text");
        assert_eq!(object.property("text"), Some(&WireValue::from("b")));
        assert_eq!(object.listener("help"), Some(false));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_message("{", &Limits::default()).unwrap_err();
        assert!(matches!(err, DecodeError::Json { .. }));
    }
}

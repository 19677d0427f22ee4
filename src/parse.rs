use serde_json::Value;

use crate::{Error, Record, Result};

/// Pulls the store entries out of a `{ data: { list: [...] } }` response and tags
/// every one of them with `round` under `round_field`.
/// An empty list is fine and yields no records, anything else that doesn't fit the shape is an error.
pub fn extract_records(body: Value, round: u32, round_field: &str) -> Result<Vec<Record>> {
    let Value::Object(mut root) = body else {
        return Err(Error::MalformedResponse);
    };
    let Some(Value::Object(mut data)) = root.remove("data") else {
        return Err(Error::MissingField("data"));
    };
    let Some(Value::Array(list)) = data.remove("list") else {
        return Err(Error::MissingField("data.list"));
    };

    list.into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(mut record) => {
                record.insert(round_field.to_string(), Value::from(round));
                Ok(record)
            }
            _ => Err(Error::MalformedRecord { index }),
        })
        .collect()
}

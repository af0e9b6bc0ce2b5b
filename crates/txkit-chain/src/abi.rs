//! Matching call data and logs against an ABI catalog.
//!
//! A catalog is an ordered slice of [`AbiEntry`] values, usually parsed from
//! a Solidity JSON ABI with [`parse_abi_json`]. Matching walks the catalog in
//! order and the first entry whose selector (for calls) or topic hash (for
//! logs) matches is used to decode the parameters.
//!
//! # Example
//!
//! ```
//! use txkit_chain::abi::{decode_function_call, parse_abi_json};
//!
//! let catalog = parse_abi_json(r#"[{
//!     "type": "function",
//!     "name": "transfer",
//!     "inputs": [
//!         {"name": "to", "type": "address"},
//!         {"name": "amount", "type": "uint256"}
//!     ],
//!     "outputs": [{"name": "", "type": "bool"}],
//!     "stateMutability": "nonpayable"
//! }]"#).unwrap();
//!
//! let data = hex::decode(concat!(
//!     "a9059cbb",
//!     "000000000000000000000000f17f52151ebef6c7334fad080c5704d77216b732",
//!     "00000000000000000000000000000000000000000000000000000000000003e8",
//! )).unwrap();
//!
//! let call = decode_function_call(&data, &catalog).unwrap().unwrap();
//! assert_eq!(call.name, "transfer");
//! assert_eq!(call.params.to_json()["amount"], "1000");
//! ```

use alloy_dyn_abi::{DynSolType, DynSolValue, EventExt, JsonAbiExt};
use alloy_json_abi::{Event, Function};
use alloy_primitives::{hex, LogData, Selector, B256};
use serde_json::{Map, Value};
use txkit_core::error::{AbiError, AbiResult};

/// One matchable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiEntry {
    /// A function, matched by its 4-byte selector.
    Function(Function),
    /// An event, matched by its topic hash.
    Event(Event),
}

impl AbiEntry {
    /// The entry's declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Function(function) => &function.name,
            Self::Event(event) => &event.name,
        }
    }
}

impl From<Function> for AbiEntry {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Event> for AbiEntry {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// Parses a Solidity JSON ABI into a catalog, keeping declaration order.
///
/// Entries without a `type` are functions. Constructors, fallbacks, receive
/// functions and errors are skipped.
///
/// # Errors
///
/// Returns [`AbiError::InvalidCatalog`] if the input is not a JSON array or a
/// function or event entry is malformed.
pub fn parse_abi_json(json: &str) -> AbiResult<Vec<AbiEntry>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| AbiError::invalid_catalog(format!("invalid JSON: {e}")))?;
    let Value::Array(items) = value else {
        return Err(AbiError::invalid_catalog("expected a JSON array"));
    };

    let mut catalog = Vec::with_capacity(items.len());
    for (index, mut item) in items.into_iter().enumerate() {
        let Some(object) = item.as_object_mut() else {
            return Err(AbiError::invalid_catalog(format!(
                "entry {index} is not an object"
            )));
        };
        let kind = object
            .entry("type")
            .or_insert_with(|| Value::from("function"))
            .as_str()
            .unwrap_or_default()
            .to_owned();

        match kind.as_str() {
            "function" => {
                let function: Function = serde_json::from_value(item).map_err(|e| {
                    AbiError::invalid_catalog(format!("entry {index}: {e}"))
                })?;
                catalog.push(AbiEntry::Function(function));
            }
            "event" => {
                let event: Event = serde_json::from_value(item).map_err(|e| {
                    AbiError::invalid_catalog(format!("entry {index}: {e}"))
                })?;
                catalog.push(AbiEntry::Event(event));
            }
            other => tracing::trace!(index, kind = other, "skipping ABI entry"),
        }
    }
    Ok(catalog)
}

/// The 4-byte selector of `function`.
#[must_use]
pub fn function_selector(function: &Function) -> Selector {
    function.selector()
}

/// The topic hash of `event`, or `None` for anonymous events.
#[must_use]
pub fn event_topic(event: &Event) -> Option<B256> {
    (!event.anonymous).then(|| event.selector())
}

/// Decoded parameters in declaration order.
///
/// Only named parameters are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedParams(Vec<(String, DynSolValue)>);

impl DecodedParams {
    fn from_named<'a>(named: impl IntoIterator<Item = (&'a str, DynSolValue)>) -> Self {
        Self(
            named
                .into_iter()
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, value)| (name.to_owned(), value))
                .collect(),
        )
    }

    /// Looks a parameter up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DynSolValue> {
        self.0
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DynSolValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of named parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no named parameters were decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the parameters as a JSON object keyed by name.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.0 {
            map.insert(name.clone(), value_to_json(value));
        }
        Value::Object(map)
    }
}

/// A call matched to a catalog function.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    /// Function name.
    pub name: String,
    /// Matched selector.
    pub selector: Selector,
    /// Named inputs.
    pub params: DecodedParams,
}

/// A log matched to a catalog event.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLog {
    /// Event name.
    pub name: String,
    /// Matched topic hash.
    pub topic: B256,
    /// Named inputs, indexed and non-indexed, in declaration order.
    pub params: DecodedParams,
}

/// Matches `call_data` to the first catalog function with the same selector
/// and decodes its inputs.
///
/// Returns `Ok(None)` when no function matches, including when `call_data`
/// is shorter than a selector.
///
/// # Errors
///
/// Returns [`AbiError::Decode`] if the matched function's inputs do not
/// decode.
pub fn decode_function_call(
    call_data: &[u8],
    catalog: &[AbiEntry],
) -> AbiResult<Option<DecodedCall>> {
    let Some((selector, args)) = call_data.split_first_chunk::<4>() else {
        return Ok(None);
    };
    let selector = Selector::from(*selector);

    let Some(function) = catalog.iter().find_map(|entry| match entry {
        AbiEntry::Function(function) if function.selector() == selector => Some(function),
        _ => None,
    }) else {
        tracing::debug!(%selector, "no function matches selector");
        return Ok(None);
    };

    let values = function
        .abi_decode_input(args)
        .map_err(|e| AbiError::decode(&function.name, e.to_string()))?;

    Ok(Some(DecodedCall {
        name: function.name.clone(),
        selector,
        params: DecodedParams::from_named(
            function.inputs.iter().map(|input| input.name.as_str()).zip(values),
        ),
    }))
}

/// Matches `log` to the first non-anonymous catalog event whose topic hash
/// equals the log's first topic and decodes its inputs.
///
/// Returns `Ok(None)` when no event matches, including when the log has no
/// topics.
///
/// # Errors
///
/// Returns [`AbiError::Decode`] if the matched event's topics or data do not
/// decode.
pub fn decode_log(log: &LogData, catalog: &[AbiEntry]) -> AbiResult<Option<DecodedLog>> {
    let Some(&topic) = log.topics().first() else {
        return Ok(None);
    };

    let Some(event) = catalog.iter().find_map(|entry| match entry {
        AbiEntry::Event(event) if event_topic(event) == Some(topic) => Some(event),
        _ => None,
    }) else {
        tracing::debug!(%topic, "no event matches topic");
        return Ok(None);
    };

    let decoded = event
        .decode_log_parts(log.topics().iter().copied(), &log.data)
        .map_err(|e| AbiError::decode(&event.name, e.to_string()))?;

    let mut indexed = decoded.indexed.into_iter();
    let mut body = decoded.body.into_iter();
    let mut named = Vec::with_capacity(event.inputs.len());
    for input in &event.inputs {
        let value = if input.indexed {
            indexed.next()
        } else {
            body.next()
        };
        let value = value.ok_or_else(|| {
            AbiError::decode(&event.name, format!("missing value for {}", input.name))
        })?;
        named.push((input.name.as_str(), value));
    }

    Ok(Some(DecodedLog {
        name: event.name.clone(),
        topic,
        params: DecodedParams::from_named(named),
    }))
}

/// ABI-encodes constructor arguments given as strings.
///
/// `signature` has the form `constructor(uint256,string)`. An empty signature
/// or `constructor()` encodes to nothing. Each argument is parsed according
/// to its declared type.
///
/// # Errors
///
/// Returns [`AbiError::Encode`] if the signature is not a constructor, the
/// argument count differs, or an argument does not parse as its type.
pub fn encode_constructor_args<S: AsRef<str>>(signature: &str, args: &[S]) -> AbiResult<Vec<u8>> {
    let signature = signature.trim();
    if signature.is_empty() || signature == "constructor()" {
        return Ok(Vec::new());
    }
    if !signature.starts_with("constructor(") {
        return Err(AbiError::encode(format!(
            "signature must start with 'constructor(': {signature}"
        )));
    }

    let function = Function::parse(signature).map_err(|e| AbiError::encode(e.to_string()))?;
    if function.inputs.len() != args.len() {
        return Err(AbiError::encode(format!(
            "expected {} arguments, got {}",
            function.inputs.len(),
            args.len()
        )));
    }

    let values = function
        .inputs
        .iter()
        .zip(args)
        .map(|(input, arg)| coerce_value(&input.selector_type(), arg.as_ref()))
        .collect::<AbiResult<Vec<_>>>()?;

    function
        .abi_encode_input_raw(&values)
        .map_err(|e| AbiError::encode(e.to_string()))
}

fn coerce_value(ty: &str, arg: &str) -> AbiResult<DynSolValue> {
    let ty = DynSolType::parse(ty).map_err(|e| AbiError::encode(e.to_string()))?;
    ty.coerce_str(arg)
        .map_err(|e| AbiError::encode(format!("{arg:?} is not a valid {ty}: {e}")))
}

/// Renders a decoded value as JSON.
///
/// Integers become decimal strings so that 256-bit values survive, byte
/// values become `0x` hex, and addresses are checksummed.
#[must_use]
pub fn value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Int(i, _) => Value::String(i.to_string()),
        DynSolValue::Uint(u, _) => Value::String(u.to_string()),
        DynSolValue::FixedBytes(word, size) => {
            Value::String(hex::encode_prefixed(&word[..*size]))
        }
        DynSolValue::Address(address) => Value::String(address.to_checksum(None)),
        DynSolValue::Function(function) => Value::String(hex::encode_prefixed(function)),
        DynSolValue::Bytes(bytes) => Value::String(hex::encode_prefixed(bytes)),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(values)
        | DynSolValue::FixedArray(values)
        | DynSolValue::Tuple(values) => Value::Array(values.iter().map(value_to_json).collect()),
        #[allow(unreachable_patterns)]
        _ => Value::Null,
    }
}

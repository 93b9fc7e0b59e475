//! `createAction` argument and result serializers.
//!
//! Transaction building itself lives outside the cryptographic core; these
//! structures exist so the wire layer can carry the surrounding wallet's
//! calls. They are plain data with no behaviour.

use crate::{
    buf::{Reader, Writer},
    error::WireError,
};

/// A transaction outpoint: 36 bytes on the wire, the 32-byte txid hash
/// followed by a little-endian output index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outpoint {
    /// Transaction id, as the little-endian hash bytes.
    pub txid: [u8; 32],
    /// Output index within the transaction.
    pub index: u32,
}

/// An input to spend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateActionInput {
    /// The outpoint being spent.
    pub outpoint: Outpoint,
    /// Ready unlocking script, when the caller already has one.
    pub unlocking_script: Option<Vec<u8>>,
    /// Predicted unlocking-script length; carried only when the script
    /// itself is absent.
    pub unlocking_script_length: u32,
    /// Human-readable description of the input.
    pub input_description: String,
    /// Input sequence number.
    pub sequence_number: Option<u32>,
}

/// An output to create.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateActionOutput {
    /// Locking script bytes.
    pub locking_script: Vec<u8>,
    /// Value in satoshis.
    pub satoshis: u64,
    /// Human-readable description of the output.
    pub output_description: String,
    /// Basket to file the output under.
    pub basket: Option<String>,
    /// Caller-private bookkeeping.
    pub custom_instructions: Option<String>,
    /// Searchable tags.
    pub tags: Option<Vec<String>>,
}

/// Trust policy for self-referential inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustSelf {
    /// Trust transactions the wallet itself already knows.
    Known,
}

/// Optional behaviour switches for action creation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateActionOptions {
    /// Sign and process the action immediately.
    pub sign_and_process: Option<bool>,
    /// Accept delayed broadcast.
    pub accept_delayed_broadcast: Option<bool>,
    /// Trust policy for self-referential inputs.
    pub trust_self: Option<TrustSelf>,
    /// Transactions the caller vouches for.
    pub known_txids: Option<Vec<[u8; 32]>>,
    /// Return only the txid.
    pub return_txid_only: Option<bool>,
    /// Build but do not broadcast.
    pub no_send: Option<bool>,
    /// Change outpoints excluded from sending.
    pub no_send_change: Option<Vec<Outpoint>>,
    /// Transactions to broadcast alongside.
    pub send_with: Option<Vec<[u8; 32]>>,
    /// Shuffle output order.
    pub randomize_outputs: Option<bool>,
}

/// Arguments for `createAction`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateActionArgs {
    /// Human-readable description of the action.
    pub description: String,
    /// Background evaluation environment for the inputs.
    pub input_beef: Option<Vec<u8>>,
    /// Inputs to spend.
    pub inputs: Option<Vec<CreateActionInput>>,
    /// Outputs to create.
    pub outputs: Option<Vec<CreateActionOutput>>,
    /// Transaction lock time.
    pub lock_time: Option<u32>,
    /// Transaction version.
    pub version: Option<u32>,
    /// Labels to file the action under.
    pub labels: Option<Vec<String>>,
    /// Behaviour switches.
    pub options: Option<CreateActionOptions>,
}

/// Batch-send status of one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// Accepted, proof pending.
    Unproven,
    /// Broadcast in progress.
    Sending,
    /// Broadcast failed.
    Failed,
}

impl ActionStatus {
    fn to_byte(self) -> u8 {
        match self {
            Self::Unproven => 1,
            Self::Sending => 2,
            Self::Failed => 3,
        }
    }

    fn from_byte(byte: u8) -> Result<Self, WireError> {
        match byte {
            1 => Ok(Self::Unproven),
            2 => Ok(Self::Sending),
            3 => Ok(Self::Failed),
            other => Err(WireError::BadOptionalTag(other)),
        }
    }
}

/// Status of a transaction sent as part of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendWithResult {
    /// Transaction id.
    pub txid: [u8; 32],
    /// Its batch status.
    pub status: ActionStatus,
}

/// A partially signed transaction awaiting completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignableTransaction {
    /// Serialized transaction.
    pub tx: Vec<u8>,
    /// Opaque reference for the follow-up signing call.
    pub reference: Vec<u8>,
}

/// Result of `createAction`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateActionResult {
    /// Id of the created transaction.
    pub txid: Option<[u8; 32]>,
    /// Serialized transaction.
    pub tx: Option<Vec<u8>>,
    /// Change outpoints excluded from sending.
    pub no_send_change: Option<Vec<Outpoint>>,
    /// Statuses of batched transactions.
    pub send_with_results: Option<Vec<SendWithResult>>,
    /// Partially signed transaction, when signing was deferred.
    pub signable_transaction: Option<SignableTransaction>,
}

/// Encode `createAction` arguments.
pub fn serialize_create_action_args(args: &CreateActionArgs) -> Vec<u8> {
    let mut writer = Writer::new();
    writer.write_string(&args.description);
    writer.write_optional_bytes(args.input_beef.as_deref());
    encode_inputs(&mut writer, args.inputs.as_deref());
    encode_outputs(&mut writer, args.outputs.as_deref());
    writer.write_optional_u32(args.lock_time);
    writer.write_optional_u32(args.version);
    writer.write_string_slice(args.labels.as_deref());
    encode_options(&mut writer, args.options.as_ref());
    writer.into_bytes()
}

/// Decode `createAction` arguments.
pub fn deserialize_create_action_args(data: &[u8]) -> Result<CreateActionArgs, WireError> {
    let mut reader = Reader::new(data);
    let args = CreateActionArgs {
        description: reader.read_string()?,
        input_beef: reader.read_optional_bytes()?,
        inputs: decode_inputs(&mut reader)?,
        outputs: decode_outputs(&mut reader)?,
        lock_time: reader.read_optional_u32()?,
        version: reader.read_optional_u32()?,
        labels: reader.read_string_slice()?,
        options: decode_options(&mut reader)?,
    };
    reader.expect_end()?;
    Ok(args)
}

/// Encode a `createAction` result.
pub fn serialize_create_action_result(result: &CreateActionResult) -> Vec<u8> {
    let mut writer = Writer::new();
    writer.write_optional_bytes(result.txid.as_ref().map(|txid| txid.as_slice()));
    writer.write_optional_bytes(result.tx.as_deref());
    encode_outpoint_list(&mut writer, result.no_send_change.as_deref());
    match &result.send_with_results {
        Some(results) => {
            writer.write_varint(results.len() as u64);
            for entry in results {
                writer.write_bytes(&entry.txid);
                writer.write_byte(entry.status.to_byte());
            }
        }
        None => writer.write_negative_one(),
    }
    match &result.signable_transaction {
        Some(signable) => {
            writer.write_byte(1);
            writer.write_varint_bytes(&signable.tx);
            writer.write_varint_bytes(&signable.reference);
        }
        None => writer.write_byte(0),
    }
    writer.into_bytes()
}

/// Decode a `createAction` result.
pub fn deserialize_create_action_result(data: &[u8]) -> Result<CreateActionResult, WireError> {
    let mut reader = Reader::new(data);

    let txid = match reader.read_optional_bytes()? {
        Some(bytes) => Some(
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| WireError::TruncatedFrame)?,
        ),
        None => None,
    };
    let tx = reader.read_optional_bytes()?;
    let no_send_change = decode_outpoint_list(&mut reader)?;

    let send_with_results = if is_sentinel(&mut reader)? {
        None
    } else {
        let count = reader.read_varint()?;
        let mut results = Vec::new();
        for _ in 0..count {
            let txid = reader.read_array::<32>()?;
            let status = ActionStatus::from_byte(reader.read_byte()?)?;
            results.push(SendWithResult { txid, status });
        }
        Some(results)
    };

    let signable_transaction = match reader.read_byte()? {
        0 => None,
        1 => Some(SignableTransaction {
            tx: reader.read_varint_bytes()?,
            reference: reader.read_varint_bytes()?,
        }),
        other => return Err(WireError::BadOptionalTag(other)),
    };

    reader.expect_end()?;
    Ok(CreateActionResult {
        txid,
        tx,
        no_send_change,
        send_with_results,
        signable_transaction,
    })
}

fn encode_outpoint(writer: &mut Writer, outpoint: &Outpoint) {
    writer.write_bytes(&outpoint.txid);
    writer.write_bytes(&outpoint.index.to_le_bytes());
}

fn decode_outpoint(reader: &mut Reader<'_>) -> Result<Outpoint, WireError> {
    let txid = reader.read_array::<32>()?;
    let index = u32::from_le_bytes(reader.read_array()?);
    Ok(Outpoint { txid, index })
}

fn encode_inputs(writer: &mut Writer, inputs: Option<&[CreateActionInput]>) {
    let Some(inputs) = inputs else {
        writer.write_negative_one();
        return;
    };
    writer.write_varint(inputs.len() as u64);
    for input in inputs {
        encode_outpoint(writer, &input.outpoint);
        writer.write_optional_bytes(input.unlocking_script.as_deref());
        if input.unlocking_script.is_none() {
            writer.write_varint(u64::from(input.unlocking_script_length));
        }
        writer.write_string(&input.input_description);
        writer.write_optional_u32(input.sequence_number);
    }
}

fn decode_inputs(reader: &mut Reader<'_>) -> Result<Option<Vec<CreateActionInput>>, WireError> {
    if is_sentinel(reader)? {
        return Ok(None);
    }
    let count = reader.read_varint()?;
    let mut inputs = Vec::new();
    for _ in 0..count {
        let outpoint = decode_outpoint(reader)?;
        let unlocking_script = reader.read_optional_bytes()?;
        let unlocking_script_length = match &unlocking_script {
            Some(_) => 0,
            None => {
                let length = reader.read_varint()?;
                u32::try_from(length).map_err(|_| WireError::MalformedVarint)?
            }
        };
        inputs.push(CreateActionInput {
            outpoint,
            unlocking_script,
            unlocking_script_length,
            input_description: reader.read_string()?,
            sequence_number: reader.read_optional_u32()?,
        });
    }
    Ok(Some(inputs))
}

fn encode_outputs(writer: &mut Writer, outputs: Option<&[CreateActionOutput]>) {
    let Some(outputs) = outputs else {
        writer.write_negative_one();
        return;
    };
    writer.write_varint(outputs.len() as u64);
    for output in outputs {
        writer.write_varint_bytes(&output.locking_script);
        writer.write_varint(output.satoshis);
        writer.write_string(&output.output_description);
        writer.write_optional_string(output.basket.as_deref());
        writer.write_optional_string(output.custom_instructions.as_deref());
        writer.write_string_slice(output.tags.as_deref());
    }
}

fn decode_outputs(reader: &mut Reader<'_>) -> Result<Option<Vec<CreateActionOutput>>, WireError> {
    if is_sentinel(reader)? {
        return Ok(None);
    }
    let count = reader.read_varint()?;
    let mut outputs = Vec::new();
    for _ in 0..count {
        outputs.push(CreateActionOutput {
            locking_script: reader.read_varint_bytes()?,
            satoshis: reader.read_varint()?,
            output_description: reader.read_string()?,
            basket: reader.read_optional_string()?,
            custom_instructions: reader.read_optional_string()?,
            tags: reader.read_string_slice()?,
        });
    }
    Ok(Some(outputs))
}

fn encode_txid_slice(writer: &mut Writer, txids: Option<&[[u8; 32]]>) {
    let Some(txids) = txids else {
        writer.write_negative_one();
        return;
    };
    writer.write_varint(txids.len() as u64);
    for txid in txids {
        writer.write_bytes(txid);
    }
}

fn decode_txid_slice(reader: &mut Reader<'_>) -> Result<Option<Vec<[u8; 32]>>, WireError> {
    if is_sentinel(reader)? {
        return Ok(None);
    }
    let count = reader.read_varint()?;
    let mut txids = Vec::new();
    for _ in 0..count {
        txids.push(reader.read_array::<32>()?);
    }
    Ok(Some(txids))
}

/// Outpoint lists travel as optional bytes wrapping a varint count plus the
/// 36-byte outpoints.
fn encode_outpoint_list(writer: &mut Writer, outpoints: Option<&[Outpoint]>) {
    let Some(outpoints) = outpoints else {
        writer.write_negative_one();
        return;
    };
    let mut inner = Writer::new();
    inner.write_varint(outpoints.len() as u64);
    for outpoint in outpoints {
        encode_outpoint(&mut inner, outpoint);
    }
    writer.write_varint_bytes(&inner.into_bytes());
}

fn decode_outpoint_list(reader: &mut Reader<'_>) -> Result<Option<Vec<Outpoint>>, WireError> {
    let Some(bytes) = reader.read_optional_bytes()? else {
        return Ok(None);
    };
    let mut inner = Reader::new(&bytes);
    let count = inner.read_varint()?;
    let mut outpoints = Vec::new();
    for _ in 0..count {
        outpoints.push(decode_outpoint(&mut inner)?);
    }
    inner.expect_end()?;
    Ok(Some(outpoints))
}

fn encode_options(writer: &mut Writer, options: Option<&CreateActionOptions>) {
    let Some(options) = options else {
        writer.write_byte(0);
        return;
    };
    writer.write_byte(1);
    writer.write_optional_bool(options.sign_and_process);
    writer.write_optional_bool(options.accept_delayed_broadcast);
    writer.write_byte(match options.trust_self {
        Some(TrustSelf::Known) => 1,
        None => 0xFF,
    });
    encode_txid_slice(writer, options.known_txids.as_deref());
    writer.write_optional_bool(options.return_txid_only);
    writer.write_optional_bool(options.no_send);
    encode_outpoint_list(writer, options.no_send_change.as_deref());
    encode_txid_slice(writer, options.send_with.as_deref());
    writer.write_optional_bool(options.randomize_outputs);
}

fn decode_options(reader: &mut Reader<'_>) -> Result<Option<CreateActionOptions>, WireError> {
    match reader.read_byte()? {
        0 => return Ok(None),
        1 => {}
        other => return Err(WireError::BadOptionalTag(other)),
    }
    let sign_and_process = reader.read_optional_bool()?;
    let accept_delayed_broadcast = reader.read_optional_bool()?;
    let trust_self = match reader.read_byte()? {
        1 => Some(TrustSelf::Known),
        0xFF => None,
        other => return Err(WireError::BadOptionalTag(other)),
    };
    Ok(Some(CreateActionOptions {
        sign_and_process,
        accept_delayed_broadcast,
        trust_self,
        known_txids: decode_txid_slice(reader)?,
        return_txid_only: reader.read_optional_bool()?,
        no_send: reader.read_optional_bool()?,
        no_send_change: decode_outpoint_list(reader)?,
        send_with: decode_txid_slice(reader)?,
        randomize_outputs: reader.read_optional_bool()?,
    }))
}

/// True (consuming it) when the next varint is the absent sentinel.
fn is_sentinel(reader: &mut Reader<'_>) -> Result<bool, WireError> {
    reader.read_sentinel()
}

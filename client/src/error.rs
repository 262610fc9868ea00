use solana_client::{
    client_error::{
        ClientError as RpcClientError,
        ClientErrorKind,
    },
    rpc_request::{
        RpcError,
        RpcResponseErrorData,
    },
    rpc_response::RpcSimulateTransactionResult,
};
use solana_instruction_error::InstructionError;
use solana_pubkey::Pubkey;
use solana_sdk::signer::SignerError;
use solana_transaction_error::TransactionError;
use woofi_interface::error::{
    WoofiError,
    WoofiProgramError,
};

/// Rejection codes from the runtime and the program framework that the client classifies.
pub mod codes {
    /// The system program's `AccountAlreadyInUse`.
    pub const SYSTEM_ACCOUNT_ALREADY_IN_USE: u32 = 0;
    /// The system program's `ResultWithNegativeLamports`.
    pub const SYSTEM_RESULT_WITH_NEGATIVE_LAMPORTS: u32 = 1;

    pub const INSTRUCTION_MISSING: u32 = 100;
    pub const INSTRUCTION_FALLBACK_NOT_FOUND: u32 = 101;
    pub const INSTRUCTION_DID_NOT_DESERIALIZE: u32 = 102;
    pub const CONSTRAINT_MUT: u32 = 2000;
    pub const CONSTRAINT_SEEDS: u32 = 2006;
    pub const CONSTRAINT_ADDRESS: u32 = 2012;
    pub const ACCOUNT_DISCRIMINATOR_NOT_FOUND: u32 = 3001;
    pub const ACCOUNT_DISCRIMINATOR_MISMATCH: u32 = 3002;
    pub const ACCOUNT_DID_NOT_DESERIALIZE: u32 = 3003;
    pub const ACCOUNT_DID_NOT_SERIALIZE: u32 = 3004;
    pub const ACCOUNT_NOT_ENOUGH_KEYS: u32 = 3005;
    pub const ACCOUNT_OWNED_BY_WRONG_PROGRAM: u32 = 3007;
    pub const ACCOUNT_NOT_INITIALIZED: u32 = 3012;
}

pub type ClientResult<T = ()> = Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An address couldn't be derived from the caller's seeds.
    #[error("invalid derivation input: {0}")]
    DerivationInputInvalid(#[source] WoofiError),

    /// The account exists but its bytes don't decode as the requested record.
    #[error("account {address} doesn't match the expected schema: {source}")]
    SchemaMismatch {
        address: Pubkey,
        source: WoofiError,
    },

    #[error("no account exists at {0}")]
    NotFound(Pubkey),

    /// The ledger rejected the transaction. The rejection is carried unmodified.
    #[error("transaction rejected: {0}")]
    Submission(TransactionError),

    /// An instruction requires a signature from an address no provided keypair signs for.
    #[error("no signer provided for {0}")]
    MissingSigner(Pubkey),

    #[error("failed to sign transaction: {0}")]
    Signing(#[from] SignerError),

    /// A transport failure with no verdict from the ledger.
    #[error("rpc request failed: {0}")]
    Rpc(#[source] Box<RpcClientError>),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// A coarse classification of a runtime rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeRejection {
    /// A create targeted an address that's already in use.
    AccountAlreadyExists,
    AccountNotFound,
    InsufficientFunds,
    /// A required signature is missing or invalid.
    SignerMismatch,
    /// The signer isn't the recorded admin, or the treasury isn't the recorded treasury.
    AuthorityMismatch,
    Program(WoofiProgramError),
    Other,
}

impl ClientError {
    /// The wrapped runtime rejection, if this is a [`ClientError::Submission`].
    pub fn transaction_error(&self) -> Option<&TransactionError> {
        match self {
            Self::Submission(error) => Some(error),
            _ => None,
        }
    }

    /// Classifies a [`ClientError::Submission`]. Returns `None` for every other variant.
    pub fn rejection(&self) -> Option<RuntimeRejection> {
        self.transaction_error().map(classify_rejection)
    }
}

pub fn classify_rejection(error: &TransactionError) -> RuntimeRejection {
    match error {
        TransactionError::InstructionError(_, error) => classify_instruction_error(error),
        TransactionError::AccountInUse => RuntimeRejection::AccountAlreadyExists,
        TransactionError::AccountNotFound | TransactionError::ProgramAccountNotFound => {
            RuntimeRejection::AccountNotFound
        }
        TransactionError::InsufficientFundsForFee
        | TransactionError::InsufficientFundsForRent { .. } => RuntimeRejection::InsufficientFunds,
        TransactionError::SignatureFailure | TransactionError::MissingSignatureForFee => {
            RuntimeRejection::SignerMismatch
        }
        _ => RuntimeRejection::Other,
    }
}

fn classify_instruction_error(error: &InstructionError) -> RuntimeRejection {
    match error {
        InstructionError::Custom(code) => classify_custom_code(*code),
        InstructionError::AccountAlreadyInitialized => RuntimeRejection::AccountAlreadyExists,
        InstructionError::UninitializedAccount | InstructionError::MissingAccount => {
            RuntimeRejection::AccountNotFound
        }
        InstructionError::InsufficientFunds => RuntimeRejection::InsufficientFunds,
        InstructionError::MissingRequiredSignature => RuntimeRejection::SignerMismatch,
        _ => RuntimeRejection::Other,
    }
}

fn classify_custom_code(code: u32) -> RuntimeRejection {
    if let Some(error) = WoofiProgramError::from_repr(code) {
        return match error {
            WoofiProgramError::Unauthorized => RuntimeRejection::AuthorityMismatch,
            WoofiProgramError::InsufficientFunds => RuntimeRejection::InsufficientFunds,
            error => RuntimeRejection::Program(error),
        };
    }
    match code {
        codes::SYSTEM_ACCOUNT_ALREADY_IN_USE => RuntimeRejection::AccountAlreadyExists,
        codes::SYSTEM_RESULT_WITH_NEGATIVE_LAMPORTS => RuntimeRejection::InsufficientFunds,
        codes::CONSTRAINT_ADDRESS => RuntimeRejection::AuthorityMismatch,
        codes::ACCOUNT_NOT_INITIALIZED | codes::ACCOUNT_NOT_ENOUGH_KEYS => {
            RuntimeRejection::AccountNotFound
        }
        _ => RuntimeRejection::Other,
    }
}

/// Pulls the ledger's verdict out of an RPC error, if the error carries one.
///
/// Preflight simulation failures and confirmed failures both carry a [`TransactionError`].
pub fn transaction_error_from_rpc(error: &RpcClientError) -> Option<TransactionError> {
    match error.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data:
                RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                    err: Some(ui_err),
                    ..
                }),
            ..
        }) => Some(ui_err.clone().into()),
        ClientErrorKind::TransactionError(error) => Some(error.clone()),
        _ => None,
    }
}

impl From<RpcClientError> for ClientError {
    fn from(error: RpcClientError) -> Self {
        match transaction_error_from_rpc(&error) {
            Some(error) => Self::Submission(error),
            None => Self::Rpc(Box::new(error)),
        }
    }
}

//! Contract gateway over a JSON-RPC node, using `alloy`.
//!
//! Reads go through one shared provider. Writes build a wallet-backed provider for the
//! active signer, run a pre-flight `eth_call` (so rejections surface before broadcast and
//! the registry's return value is known), then broadcast and return the transaction hash.

use crate::domain::{DocumentRecord, Issuer, LedgerFailure, PendingWrite, WriteCall, WriteReceipt};
use crate::foundation::{ContentDigest, IssuerId, LedgerError, TxReference};
use crate::infrastructure::config::LedgerConfig;
use crate::infrastructure::gateway::ContractGateway;
use crate::infrastructure::wallet::ActiveSigner;
use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::{decode_revert_reason, SolCall};
use alloy::transports::TransportError;
use async_trait::async_trait;
use log::{debug, info};
use std::str::FromStr;
use url::Url;

sol! {
    interface IssuerRegistry {
        struct Issuer {
            uint256 id;
            string name;
            string organization;
            string email;
            address owner;
        }

        function registerIssuer(string name, string organization, string email) external returns (uint256);
        function getAllIssuers() external view returns (Issuer[] memory);
    }

    interface DocumentVerifier {
        function storeDocument(bytes32 docHash, uint256 issuerId) external;
        function verifyDocument(bytes32 docHash) external view returns (
            bool exists,
            uint256 id,
            string name,
            string organization,
            string email,
            address owner,
            uint256 timestamp
        );
        function deleteDocument(bytes32 docHash) external;
    }
}

#[derive(Clone, Debug)]
pub struct EvmSettings {
    pub rpc_url: Url,
    pub chain_id: u64,
    pub registry: Address,
    pub verifier: Address,
}

impl EvmSettings {
    pub fn from_config(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let rpc_url = Url::parse(config.rpc_url.trim())
            .map_err(|err| LedgerError::ConfigError(format!("invalid ledger.rpc_url {}: {}", config.rpc_url, err)))?;
        Ok(Self {
            rpc_url,
            chain_id: config.chain_id,
            registry: parse_address(&config.registry_address)?,
            verifier: parse_address(&config.verifier_address)?,
        })
    }
}

fn parse_address(input: &str) -> Result<Address, LedgerError> {
    Address::from_str(input.trim()).map_err(|err| LedgerError::invalid_address(input, err.to_string()))
}

pub struct EvmGateway {
    settings: EvmSettings,
    reader: DynProvider,
}

impl EvmGateway {
    /// Does not contact the node; the first request does.
    pub fn new(settings: EvmSettings) -> Result<Self, LedgerError> {
        let reader = ProviderBuilder::new().connect_http(settings.rpc_url.clone()).erased();
        info!(
            "evm gateway configured chain_id={} registry={} verifier={}",
            settings.chain_id, settings.registry, settings.verifier
        );
        Ok(Self { settings, reader })
    }

    pub fn settings(&self) -> &EvmSettings {
        &self.settings
    }

    fn encode_write(&self, call: &WriteCall) -> (Address, Vec<u8>) {
        match call {
            WriteCall::RegisterIssuer { name, organization, email } => (
                self.settings.registry,
                IssuerRegistry::registerIssuerCall { name: name.clone(), organization: organization.clone(), email: email.clone() }
                    .abi_encode(),
            ),
            WriteCall::StoreDocument { digest, issuer_id } => (
                self.settings.verifier,
                DocumentVerifier::storeDocumentCall { docHash: B256::from(*digest), issuerId: U256::from(*issuer_id) }.abi_encode(),
            ),
            WriteCall::DeleteDocument { digest } => {
                (self.settings.verifier, DocumentVerifier::deleteDocumentCall { docHash: B256::from(*digest) }.abi_encode())
            }
        }
    }

    async fn read<C: SolCall>(&self, to: Address, call: C, operation: &str) -> Result<C::Return, LedgerFailure> {
        let request = TransactionRequest::default().to(to).input(call.abi_encode().into());
        let output = self.reader.call(request).await.map_err(|err| normalize_rpc_error(operation, &err))?;
        C::abi_decode_returns(&output).map_err(|err| LedgerFailure::transport(operation, format!("undecodable return data: {err}")))
    }
}

/// Lifts a contract revert reason out of a node error, falling back to the message text.
fn normalize_rpc_error(operation: &str, err: &TransportError) -> LedgerFailure {
    if let Some(payload) = err.as_error_resp() {
        if let Some(reason) = payload.as_revert_data().and_then(|data| decode_revert_reason(&data)) {
            return failure_from_revert_reason(&reason);
        }
        return LedgerFailure::from_node_message(operation, &payload.message);
    }
    LedgerFailure::from_node_message(operation, &err.to_string())
}

fn failure_from_revert_reason(decoded: &str) -> LedgerFailure {
    LedgerFailure::reverted(decoded.strip_prefix("revert: ").unwrap_or(decoded))
}

fn to_issuer_id(value: U256, operation: &str) -> Result<IssuerId, LedgerFailure> {
    IssuerId::try_from(value).map_err(|_| LedgerFailure::transport(operation, format!("issuer id {value} exceeds u64")))
}

#[async_trait]
impl ContractGateway for EvmGateway {
    async fn list_issuers(&self) -> Result<Vec<Issuer>, LedgerFailure> {
        let operation = "listIssuers";
        debug!("evm read operation={} registry={}", operation, self.settings.registry);
        let raw = self.read(self.settings.registry, IssuerRegistry::getAllIssuersCall {}, operation).await?;
        raw.into_iter()
            .map(|issuer| {
                Ok(Issuer {
                    id: to_issuer_id(issuer.id, operation)?,
                    name: issuer.name,
                    organization: issuer.organization,
                    email: issuer.email,
                    owner: issuer.owner,
                })
            })
            .collect()
    }

    async fn verify_document(&self, digest: &ContentDigest) -> Result<DocumentRecord, LedgerFailure> {
        let operation = "verifyDocument";
        debug!("evm read operation={} digest={:#x}", operation, digest);
        let call = DocumentVerifier::verifyDocumentCall { docHash: B256::from(*digest) };
        let ret = self.read(self.settings.verifier, call, operation).await?;
        if !ret.exists {
            return Ok(DocumentRecord::missing(*digest));
        }
        Ok(DocumentRecord {
            digest: *digest,
            exists: true,
            issuer_id: to_issuer_id(ret.id, operation)?,
            issuer_name: ret.name,
            organization: ret.organization,
            email: ret.email,
            owner: ret.owner,
            created_at: u64::try_from(ret.timestamp).unwrap_or(u64::MAX),
        })
    }

    async fn submit(&self, signer: &ActiveSigner, call: WriteCall) -> Result<PendingWrite, LedgerFailure> {
        let operation = call.kind().location();
        let wallet = signer.wallet.clone().ok_or(LedgerFailure::MissingSigner)?;
        let (to, input) = self.encode_write(&call);
        let request = TransactionRequest::default()
            .from(signer.identity)
            .to(to)
            .input(input.into())
            .with_chain_id(self.settings.chain_id);

        let preflight = self.reader.call(request.clone()).await.map_err(|err| normalize_rpc_error(operation, &err))?;
        let expected_issuer_id = match &call {
            WriteCall::RegisterIssuer { .. } => {
                let id = IssuerRegistry::registerIssuerCall::abi_decode_returns(&preflight)
                    .map_err(|err| LedgerFailure::transport(operation, format!("undecodable return data: {err}")))?;
                Some(to_issuer_id(id, operation)?)
            }
            _ => None,
        };

        let writer = ProviderBuilder::new().wallet(wallet).connect_http(self.settings.rpc_url.clone());
        let sent = writer.send_transaction(request).await.map_err(|err| normalize_rpc_error(operation, &err))?;
        let reference = TxReference::from(*sent.tx_hash());
        info!("evm write submitted operation={} from={} tx_hash={:#x}", operation, signer.identity, reference);
        Ok(PendingWrite { reference, call, submitted_by: signer.identity, expected_issuer_id })
    }

    async fn confirm(&self, pending: &PendingWrite) -> Result<WriteReceipt, LedgerFailure> {
        let operation = pending.call.kind().location();
        let tx_hash = B256::from(*pending.reference.as_hash());
        let receipt = PendingTransactionBuilder::new(self.reader.root().clone(), tx_hash)
            .get_receipt()
            .await
            .map_err(|err| LedgerFailure::from_node_message(operation, &err.to_string()))?;
        if !receipt.status() {
            return Err(LedgerFailure::Dropped { reference: pending.reference });
        }
        debug!("evm write finalized operation={} tx_hash={:#x} block={:?}", operation, pending.reference, receipt.block_number);
        Ok(WriteReceipt { reference: pending.reference, block_number: receipt.block_number, issuer_id: pending.expected_issuer_id })
    }
}

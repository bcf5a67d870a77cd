//! Client for the Management registry contract.

use alloy::{
    primitives::{Address, Bytes, Signature, U256},
    rpc::types::{Filter, TransactionReceipt, TransactionRequest},
    sol_types::{SolCall, SolEvent},
};
use std::sync::Arc;

use crate::{
    crypto::{self, Passphrase},
    error::Result,
    ethereum::{
        contracts::management::IManagement,
        subscription::{decode_log, spawn_forwarder, EventCallback, EventSubscription},
        EthereumClient, WalletManager,
    },
    types::{ExaminationEvent, ExaminationInfo},
};

/// Bridge between the local signing identity and the Management registry.
///
/// Deploys new Examination contracts, signs messages and provides the
/// passphrase-keyed encryption helpers shared with [`ExaminationClient`].
///
/// [`ExaminationClient`]: crate::services::ExaminationClient
pub struct ManagementClient {
    client: Arc<EthereumClient>,
    wallet: WalletManager,
    passphrase: Passphrase,
    address: Address,
    /// Random nonce baked into deployments so this instance can pick its own
    /// StartExamination events out of the registry's stream.
    random: u32,
}

impl ManagementClient {
    /// Create a client bound to the registry at `management_address`.
    pub fn new(
        client: Arc<EthereumClient>,
        wallet: WalletManager,
        passphrase: Passphrase,
        management_address: Address,
    ) -> Self {
        let random = rand::random::<u32>();
        tracing::debug!(address = %management_address, random = random, "Management client created");
        Self { client, wallet, passphrase, address: management_address, random }
    }

    /// The event correlation nonce drawn for this instance.
    pub fn random(&self) -> u32 {
        self.random
    }

    /// The hospital's wallet address.
    pub fn hospital_address(&self) -> Address {
        self.wallet.address()
    }

    pub(crate) fn client(&self) -> &Arc<EthereumClient> {
        &self.client
    }

    pub(crate) fn wallet(&self) -> &WalletManager {
        &self.wallet
    }

    pub(crate) fn passphrase(&self) -> &Passphrase {
        &self.passphrase
    }

    /// Deploy a new Examination contract through the registry.
    ///
    /// The patient passphrase is encrypted under the hospital passphrase
    /// before it leaves the process. The resulting StartExamination event
    /// carries this instance's correlation nonce and is observed through
    /// [`subscribe_event`](Self::subscribe_event).
    pub async fn deploy(
        &self,
        patient_data: &str,
        signature: &Signature,
        patient_passphrase: &str,
        token_address: Address,
    ) -> Result<TransactionReceipt> {
        let encrypted_passphrase = crypto::encrypt(patient_passphrase, self.passphrase.as_str())?;

        let call = IManagement::startExaminationCall {
            patientData: patient_data.to_string(),
            signature: Bytes::from(signature.as_bytes().to_vec()),
            patientPassPhrase: encrypted_passphrase,
            tokenAddress: token_address,
            random: self.random,
        };

        tracing::info!(token = %token_address, random = self.random, "Deploying examination contract");

        let tx = TransactionRequest::default()
            .to(self.address)
            .input(Bytes::from(call.abi_encode()).into());
        self.client.send_transaction(tx, &self.wallet).await
    }

    /// Read the registry's full list of deployed examinations.
    pub async fn get_examination_list(&self) -> Result<Vec<ExaminationInfo>> {
        let contract = IManagement::new(self.address, self.client.provider().clone());
        let list = contract.getExaminationList().call().await?;

        Ok(list
            .into_iter()
            .map(|info| ExaminationInfo { address: info.examinationContract, start: info.start })
            .collect())
    }

    /// Subscribe to StartExamination events for this hospital and nonce.
    ///
    /// Transport and decode failures are logged and swallowed; the callback
    /// is simply not invoked for the affected event.
    pub async fn subscribe_event(
        &self,
        callback: impl Fn(ExaminationEvent) + Send + Sync + 'static,
    ) -> Result<EventSubscription> {
        let filter = Filter::new()
            .address(self.address)
            .event_signature(IManagement::StartExamination::SIGNATURE_HASH)
            .topic1(self.wallet.address().into_word())
            .topic3(U256::from(self.random));

        let subscription = self.client.subscribe_logs(&filter).await?;
        tracing::info!(random = self.random, "Subscribed to StartExamination events");

        let callback: EventCallback = Arc::new(callback);
        let task = spawn_forwarder(subscription.into_stream(), decode_management_log, callback);
        Ok(EventSubscription::new(vec![task]))
    }

    /// Sign an arbitrary message with the hospital key (EIP-191).
    pub fn sign_message(&self, message: &str) -> Result<Signature> {
        self.wallet.sign_message(message)
    }

    /// Encrypt a payload under an explicit passphrase.
    pub fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<String> {
        crypto::encrypt(plaintext, passphrase)
    }

    /// Decrypt a blob under an explicit passphrase.
    pub fn decrypt(&self, blob: &str, passphrase: &str) -> Result<String> {
        crypto::decrypt(blob, passphrase)
    }

    /// Encrypt a payload under the hospital passphrase.
    pub fn encrypt_by_own(&self, plaintext: &str) -> Result<String> {
        crypto::encrypt(plaintext, self.passphrase.as_str())
    }

    /// Decrypt a blob under the hospital passphrase.
    pub fn decrypt_by_own(&self, blob: &str) -> Result<String> {
        crypto::decrypt(blob, self.passphrase.as_str())
    }

    /// Whether a string is a well-formed Ethereum address.
    pub fn is_address(address: &str) -> bool {
        address.parse::<Address>().is_ok()
    }
}

fn decode_management_log(log: &alloy::rpc::types::Log) -> Option<ExaminationEvent> {
    let event = decode_log::<IManagement::StartExamination>(log)?;
    Some(ExaminationEvent::StartExamination {
        contract_address: event.contractAddress,
        hospital_address: event.hospitalAddress,
        patient_address: event.patientAddress,
        token_address: event.tokenAddress,
        random: event.random,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, LogData};
    use alloy::rpc::types::Log;

    fn wrap_log(address: Address, data: LogData) -> Log {
        Log { inner: alloy::primitives::Log { address, data }, ..Default::default() }
    }

    #[test]
    fn test_decode_start_examination_event() {
        let registry = address!("784E422EaF65Fd8BEfcF2A6EA8fe651047c343E5");
        let event = IManagement::StartExamination {
            contractAddress: address!("0000000000000000000000000000000000000010"),
            hospitalAddress: address!("0000000000000000000000000000000000000011"),
            patientAddress: address!("0000000000000000000000000000000000000012"),
            tokenAddress: address!("0000000000000000000000000000000000000013"),
            random: 0xdeadbeef,
        };
        let log = wrap_log(registry, event.encode_log_data());

        let decoded = decode_management_log(&log).expect("event should decode");
        match decoded {
            ExaminationEvent::StartExamination {
                contract_address,
                hospital_address,
                patient_address,
                token_address,
                random,
            } => {
                assert_eq!(contract_address, address!("0000000000000000000000000000000000000010"));
                assert_eq!(hospital_address, address!("0000000000000000000000000000000000000011"));
                assert_eq!(patient_address, address!("0000000000000000000000000000000000000012"));
                assert_eq!(token_address, address!("0000000000000000000000000000000000000013"));
                assert_eq!(random, 0xdeadbeef);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_foreign_log() {
        // A log with no topics cannot be a StartExamination event
        let log = wrap_log(Address::ZERO, LogData::default());
        assert!(decode_management_log(&log).is_none());
    }

    #[test]
    fn test_is_address() {
        assert!(ManagementClient::is_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"));
        assert!(!ManagementClient::is_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA9604"));
        assert!(!ManagementClient::is_address("not an address"));
        assert!(!ManagementClient::is_address(""));
    }
}

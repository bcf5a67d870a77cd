//! Client for one deployed Examination contract and its payment token.

use alloy::{
    primitives::{Address, Bytes, Signature},
    rpc::types::{Filter, Log, TransactionReceipt, TransactionRequest},
    sol_types::{SolCall, SolEvent},
};
use std::sync::Arc;

use crate::{
    crypto::{self, Passphrase},
    error::{AppError, Result},
    ethereum::{
        contracts::{erc20::IERC20, examination::IExamination},
        subscription::{decode_log, spawn_forwarder, EventCallback, EventSubscription},
        EthereumClient, WalletManager,
    },
    services::ManagementClient,
    types::{
        cost_to_token_amount, format_units, ExaminationEvent, MedicalNote, PatientInfo,
        PatientKey, PaymentStatus, TokenData,
    },
};

/// Check that `signature` over `cost` was produced by `patient_address`.
///
/// Pure local check; runs before any transaction is built or submitted.
pub fn verify_cost_signature(
    cost: &str,
    signature: &Signature,
    patient_address: Address,
) -> Result<()> {
    let recovered = WalletManager::recover_signer(cost, signature)?;
    if recovered != patient_address {
        return Err(AppError::Unauthorized { expected: patient_address, recovered });
    }
    Ok(())
}

/// Bridge to one deployed Examination contract and its paired ERC-20 token.
///
/// Shares the connection, wallet and hospital passphrase of the
/// [`ManagementClient`] it was created from. Operations touching medical
/// notes require the [`PatientKey`] produced by
/// [`get_patient_info`](Self::get_patient_info).
pub struct ExaminationClient {
    client: Arc<EthereumClient>,
    wallet: WalletManager,
    hospital_passphrase: Passphrase,
    address: Address,
    token_address: Address,
}

impl ExaminationClient {
    /// Bind to the Examination contract at `examination_address`.
    pub fn new(
        management: &ManagementClient,
        examination_address: Address,
        token_address: Address,
    ) -> Self {
        tracing::debug!(address = %examination_address, token = %token_address, "Examination client created");
        Self {
            client: management.client().clone(),
            wallet: management.wallet().clone(),
            hospital_passphrase: management.passphrase().clone(),
            address: examination_address,
            token_address,
        }
    }

    /// The address of the bound Examination contract.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Read and decrypt the patient record.
    ///
    /// The patient passphrase stored on-chain is decrypted under the hospital
    /// passphrase, then the patient data under the recovered passphrase. The
    /// returned [`PatientKey`] unlocks the note operations and event
    /// subscription.
    pub async fn get_patient_info(&self) -> Result<(PatientInfo, PatientKey)> {
        let contract = IExamination::new(self.address, self.client.provider().clone());
        let info = contract.getPatientInfo().call().await?;

        let patient_passphrase =
            crypto::decrypt(&info.patientPassPhrase, self.hospital_passphrase.as_str())?;
        let data = crypto::decrypt(&info.patientData, &patient_passphrase)?;

        tracing::debug!(patient = %info.patientAddress, "Patient info loaded");

        Ok((
            PatientInfo { address: info.patientAddress, data },
            PatientKey::new(Passphrase::new(patient_passphrase)),
        ))
    }

    /// Read the payment token's metadata.
    pub async fn get_token_data(&self) -> Result<TokenData> {
        let contract = IExamination::new(self.address, self.client.provider().clone());
        let data = contract.getTokenData().call().await?;
        Ok(TokenData { name: data.name, symbol: data.symbol, decimals: data.decimals })
    }

    /// Total ether spent by the contract, as a decimal ether string.
    pub async fn get_used_ether(&self) -> Result<String> {
        let contract = IExamination::new(self.address, self.client.provider().clone());
        let used_wei = contract.getUsedEther().call().await?;
        Ok(format_units(used_wei, 18))
    }

    /// Read the contract's payment state.
    pub async fn get_payment_status(&self) -> Result<PaymentStatus> {
        let contract = IExamination::new(self.address, self.client.provider().clone());
        let status = contract.getPaymentStatus().call().await?;
        Ok(PaymentStatus {
            deposit: status.deposit,
            medical_cost: status.medicalCost,
            unpaid_cost: status.unpaidCost,
            signed: status.signed,
            paid_to_hospital: status.paidToHospital,
            paid_to_patient: status.paidToPatient,
        })
    }

    /// Register the medical cost, given as a decimal string (e.g. "12.34").
    ///
    /// The cost is converted to the token's smallest unit against the
    /// token's on-chain decimals before submission.
    pub async fn set_medical_cost(&self, cost: &str) -> Result<TransactionReceipt> {
        let token = self.get_token_data().await?;
        let amount = cost_to_token_amount(cost, token.decimals)?;

        tracing::info!(cost = cost, amount = %amount, symbol = %token.symbol, "Setting medical cost");

        let call = IExamination::setMedicalCostCall { medicalCost: amount };
        self.submit(call.abi_encode()).await
    }

    /// Record the patient's countersignature over the medical cost.
    ///
    /// Fails with [`AppError::Unauthorized`] before any network call if the
    /// signature does not recover to `patient_address`.
    pub async fn sign_medical_cost(
        &self,
        cost: &str,
        signature: &str,
        patient_address: Address,
    ) -> Result<TransactionReceipt> {
        let signature = WalletManager::parse_signature(signature)?;
        verify_cost_signature(cost, &signature, patient_address)?;

        tracing::info!(cost = cost, patient = %patient_address, "Countersigning medical cost");

        let call = IExamination::signMedicalCostCall {
            signature: Bytes::from(signature.as_bytes().to_vec()),
        };
        self.submit(call.abi_encode()).await
    }

    /// Withdraw the escrowed payment.
    ///
    /// Hospital-only; authorization is enforced entirely by the contract.
    pub async fn withdraw(&self) -> Result<TransactionReceipt> {
        tracing::info!("Withdrawing escrowed payment");
        self.submit(IExamination::withDrawCall {}.abi_encode()).await
    }

    /// Append a medical note, encrypted under the patient passphrase.
    pub async fn add_medical_note(
        &self,
        note: &str,
        key: &PatientKey,
    ) -> Result<TransactionReceipt> {
        let encrypted = crypto::encrypt(note, key.passphrase().as_str())?;

        let call = IExamination::addMedicalNoteCall { note: encrypted };
        self.submit(call.abi_encode()).await
    }

    /// Read and decrypt all medical notes, preserving on-chain order.
    pub async fn get_medical_notes(&self, key: &PatientKey) -> Result<Vec<MedicalNote>> {
        let contract = IExamination::new(self.address, self.client.provider().clone());
        let notes = contract.getMedicalNotes().call().await?;

        notes
            .into_iter()
            .map(|entry| {
                let note = crypto::decrypt(&entry.note, key.passphrase().as_str())?;
                Ok(MedicalNote { note, timestamp: entry.timestamp })
            })
            .collect()
    }

    /// Subscribe to all Examination events plus ERC-20 transfers addressed
    /// to this contract.
    ///
    /// AddMedicalNote payloads are decrypted in place before forwarding; all
    /// other events pass through unmodified. Decode and decryption failures
    /// are logged and the affected event dropped. Release the returned
    /// handle with [`EventSubscription::unsubscribe`].
    pub async fn subscribe_event(
        &self,
        key: &PatientKey,
        callback: impl Fn(ExaminationEvent) + Send + Sync + 'static,
    ) -> Result<EventSubscription> {
        let examination_filter = Filter::new().address(self.address);
        let transfer_filter = Filter::new()
            .address(self.token_address)
            .event_signature(IERC20::Transfer::SIGNATURE_HASH)
            .topic2(self.address.into_word());

        let examination_sub = self.client.subscribe_logs(&examination_filter).await?;
        let transfer_sub = self.client.subscribe_logs(&transfer_filter).await?;

        tracing::info!(address = %self.address, "Subscribed to examination and transfer events");

        let callback: EventCallback = Arc::new(callback);
        let key = key.clone();
        let examination_task = spawn_forwarder(
            examination_sub.into_stream(),
            move |log| decode_examination_log(log, &key),
            callback.clone(),
        );
        let transfer_task =
            spawn_forwarder(transfer_sub.into_stream(), decode_transfer_log, callback);

        Ok(EventSubscription::new(vec![examination_task, transfer_task]))
    }

    async fn submit(&self, calldata: Vec<u8>) -> Result<TransactionReceipt> {
        let tx = TransactionRequest::default()
            .to(self.address)
            .input(Bytes::from(calldata).into());
        self.client.send_transaction(tx, &self.wallet).await
    }
}

/// Decode one Examination-contract log into an event, decrypting
/// AddMedicalNote payloads with the patient key.
fn decode_examination_log(log: &Log, key: &PatientKey) -> Option<ExaminationEvent> {
    let Some(&topic0) = log.inner.data.topics().first() else {
        tracing::warn!("Received log without topics");
        return None;
    };

    if topic0 == IExamination::SetMedicalCost::SIGNATURE_HASH {
        let event = decode_log::<IExamination::SetMedicalCost>(log)?;
        Some(ExaminationEvent::SetMedicalCost { medical_cost: event.medicalCost })
    } else if topic0 == IExamination::SignMedicalCost::SIGNATURE_HASH {
        let event = decode_log::<IExamination::SignMedicalCost>(log)?;
        Some(ExaminationEvent::SignMedicalCost { signed: event.signed })
    } else if topic0 == IExamination::WithDraw::SIGNATURE_HASH {
        let event = decode_log::<IExamination::WithDraw>(log)?;
        Some(ExaminationEvent::WithDraw {
            unpaid_cost: event.unpaidCost,
            paid_to_hospital: event.paidToHospital,
            paid_to_patient: event.paidToPatient,
        })
    } else if topic0 == IExamination::AddMedicalNote::SIGNATURE_HASH {
        let event = decode_log::<IExamination::AddMedicalNote>(log)?;
        match crypto::decrypt(&event.note, key.passphrase().as_str()) {
            Ok(note) => {
                Some(ExaminationEvent::AddMedicalNote { timestamp: event.timestamp, note })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decrypt medical note event");
                None
            }
        }
    } else if topic0 == IExamination::EventFailed::SIGNATURE_HASH {
        let event = decode_log::<IExamination::EventFailed>(log)?;
        Some(ExaminationEvent::EventFailed {
            event_name: event.eventName,
            message: event.message,
        })
    } else {
        tracing::warn!(topic = %topic0, "Unrecognized examination event");
        None
    }
}

/// Decode one ERC-20 Transfer log.
fn decode_transfer_log(log: &Log) -> Option<ExaminationEvent> {
    let event = decode_log::<IERC20::Transfer>(log)?;
    Some(ExaminationEvent::Transfer { from: event.from, to: event.to, value: event.value })
}

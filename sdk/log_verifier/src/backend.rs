//! Transport to the registry.

use log_registry::LogRegistryContractClient;
use soroban_sdk::{Address, Bytes, BytesN, String as SorobanString};

use crate::error::VerifierError;
use crate::{AnchorReceipt, AnchorRequest, OrgId};

/// The two registry calls the verifier needs.
///
/// Implementations report registry rejections as
/// [`VerifierError::Rejected`], host aborts as [`VerifierError::Invoke`], and
/// only transport faults worth retrying as [`VerifierError::Transient`].
pub trait RegistryBackend {
    fn save_log(&self, request: &AnchorRequest) -> Result<AnchorReceipt, VerifierError>;

    fn verify_log(&self, org_id: &OrgId, log_id: u64, raw: &[u8]) -> Result<bool, VerifierError>;
}

/// Backend over the generated contract client.
///
/// Writes are submitted as `submitter`, which must hold the `OrgAdmin`
/// capability of every organisation it anchors for.
pub struct SorobanBackend<'a> {
    client: LogRegistryContractClient<'a>,
    submitter: Address,
}

impl<'a> SorobanBackend<'a> {
    pub fn new(client: LogRegistryContractClient<'a>, submitter: Address) -> Self {
        Self { client, submitter }
    }

    pub fn submitter(&self) -> &Address {
        &self.submitter
    }
}

/// Flattens the nested result of a generated `try_*` call.
fn flatten<T, C, I>(
    result: Result<Result<T, C>, Result<log_registry::RegistryError, I>>,
) -> Result<T, VerifierError>
where
    C: core::fmt::Debug,
    I: core::fmt::Debug,
{
    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(conversion)) => Err(VerifierError::Decode(format!("{conversion:?}"))),
        Err(Ok(rejected)) => Err(VerifierError::Rejected(rejected)),
        Err(Err(invoke)) => Err(VerifierError::Invoke(format!("{invoke:?}"))),
    }
}

impl RegistryBackend for SorobanBackend<'_> {
    fn save_log(&self, request: &AnchorRequest) -> Result<AnchorReceipt, VerifierError> {
        let env = &self.client.env;
        let org_id = BytesN::from_array(env, &request.org_id);
        let log_id = flatten(self.client.try_save_log(
            &self.submitter,
            &org_id,
            &BytesN::from_array(env, &request.user_id),
            &request.log_type,
            &BytesN::from_array(env, &request.log_hash),
            &SorobanString::from_str(env, &request.ref_uri),
        ))?;

        let entry = self.client.get_log(&org_id, &log_id).ok_or_else(|| {
            VerifierError::Decode(format!("anchored log {log_id} is not readable"))
        })?;
        Ok(AnchorReceipt {
            log_id,
            timestamp: entry.timestamp,
        })
    }

    fn verify_log(&self, org_id: &OrgId, log_id: u64, raw: &[u8]) -> Result<bool, VerifierError> {
        let env = &self.client.env;
        flatten(self.client.try_verify_log(
            &BytesN::from_array(env, org_id),
            &log_id,
            &Bytes::from_slice(env, raw),
        ))
    }
}

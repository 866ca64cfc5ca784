#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use log_registry::{LogRegistryContract, LogRegistryContractClient, LogType, RegistryError};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Bytes, BytesN, Env, String,
};

const ORGS: usize = 3;
const USERS: usize = 2;

/// Actions covering every registry write path plus pause and role changes.
///
/// Indices are reduced modulo the fixture pools, so every input executes.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Save { org: u8, user: u8, kind: u8, payload: Vec<u8> },
    SaveRawHash { org: u8, user: u8, hash: [u8; 32] },
    SaveAsStranger { org: u8, user: u8 },
    Verify { org: u8, log_id: u8, payload: Vec<u8> },
    RevokeAdmin { org: u8 },
    GrantAdmin { org: u8 },
    PauseOrg { org: u8 },
    UnpauseOrg { org: u8 },
    PauseGlobal,
    UnpauseGlobal,
    AdvanceTime { delta: u16 },
}

fn log_type(kind: u8) -> LogType {
    match kind % 7 {
        0 => LogType::Auth,
        1 => LogType::FileAccess,
        2 => LogType::Network,
        3 => LogType::Firewall,
        4 => LogType::App,
        5 => LogType::Email,
        _ => LogType::Txn,
    }
}

fn id(env: &Env, tag: u8, index: usize) -> BytesN<32> {
    let mut buf = [0u8; 32];
    buf[0] = tag;
    buf[1] = index as u8;
    BytesN::from_array(env, &buf)
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(LogRegistryContract, ());
    let client = LogRegistryContractClient::new(&env, &contract_id);
    let platform = Address::generate(&env);
    let stranger = Address::generate(&env);
    if client.try_initialize(&platform).is_err() {
        return;
    }

    let mut orgs = Vec::new();
    for o in 0..ORGS {
        let org_id = id(&env, b'o', o);
        let admin = Address::generate(&env);
        client.register_org(&platform, &org_id, &String::from_str(&env, "org"), &admin);
        let users: Vec<_> = (0..USERS).map(|u| id(&env, b'u', o * USERS + u)).collect();
        for user in &users {
            client.register_user(
                &admin,
                &org_id,
                user,
                &String::from_str(&env, "did:fuzz"),
                &String::from_str(&env, ""),
            );
        }
        orgs.push((org_id, admin, users));
    }
    let uri = String::from_str(&env, "ipfs://QmFuzz");

    // Model: anchored digests per org, in id order.
    let mut anchored: Vec<Vec<BytesN<32>>> = vec![Vec::new(); ORGS];

    for action in actions {
        match action {
            FuzzAction::Save { org, user, kind, payload } => {
                let o = org as usize % ORGS;
                let (org_id, admin, users) = &orgs[o];
                let paused = client.is_effectively_paused(org_id);
                let digest = env
                    .crypto()
                    .sha256(&Bytes::from_slice(&env, &payload))
                    .to_bytes();
                let result = client.try_save_log(
                    admin,
                    org_id,
                    &users[user as usize % USERS],
                    &log_type(kind),
                    &digest,
                    &uri,
                );
                match result {
                    Ok(Ok(log_id)) => {
                        assert!(!paused, "INVARIANT VIOLATION: write accepted while paused");
                        anchored[o].push(digest);
                        assert_eq!(log_id, anchored[o].len() as u64, "INVARIANT VIOLATION: id gap");
                    }
                    Err(Ok(_)) => {}
                    other => panic!("host failure on save: {other:?}"),
                }
            }
            FuzzAction::SaveRawHash { org, user, hash } => {
                let o = org as usize % ORGS;
                let (org_id, admin, users) = &orgs[o];
                let digest = BytesN::from_array(&env, &hash);
                let result = client.try_save_log(
                    admin,
                    org_id,
                    &users[user as usize % USERS],
                    &LogType::App,
                    &digest,
                    &uri,
                );
                match result {
                    Ok(Ok(_)) => {
                        assert_ne!(hash, [0u8; 32], "INVARIANT VIOLATION: zero digest accepted");
                        anchored[o].push(digest);
                    }
                    Err(Ok(RegistryError::ZeroHash)) => assert_eq!(hash, [0u8; 32]),
                    _ => {}
                }
            }
            FuzzAction::SaveAsStranger { org, user } => {
                let (org_id, _, users) = &orgs[org as usize % ORGS];
                let result = client.try_save_log(
                    &stranger,
                    org_id,
                    &users[user as usize % USERS],
                    &LogType::Auth,
                    &BytesN::from_array(&env, &[0xAA; 32]),
                    &uri,
                );
                assert_eq!(
                    result,
                    Err(Ok(RegistryError::Unauthorized)),
                    "INVARIANT VIOLATION: stranger write not refused"
                );
            }
            FuzzAction::Verify { org, log_id, payload } => {
                let o = org as usize % ORGS;
                let log_id = log_id as u64;
                let raw = Bytes::from_slice(&env, &payload);
                let result = client.try_verify_log(&orgs[o].0, &log_id, &raw);
                match anchored[o].get((log_id as usize).wrapping_sub(1)) {
                    Some(expected) => {
                        let matched = env.crypto().sha256(&raw).to_bytes() == *expected;
                        assert_eq!(result, Ok(Ok(matched)));
                    }
                    _ => assert_eq!(result, Err(Ok(RegistryError::LogNotFound))),
                }
            }
            FuzzAction::RevokeAdmin { org } => {
                let (org_id, admin, _) = &orgs[org as usize % ORGS];
                let _ = client.try_revoke_org_admin(&platform, org_id, admin);
            }
            FuzzAction::GrantAdmin { org } => {
                let (org_id, admin, _) = &orgs[org as usize % ORGS];
                let _ = client.try_grant_org_admin(&platform, org_id, admin);
            }
            FuzzAction::PauseOrg { org } => {
                let _ = client.try_pause_org(&platform, &orgs[org as usize % ORGS].0);
            }
            FuzzAction::UnpauseOrg { org } => {
                let _ = client.try_unpause_org(&platform, &orgs[org as usize % ORGS].0);
            }
            FuzzAction::PauseGlobal => {
                let _ = client.try_pause_global(&platform);
            }
            FuzzAction::UnpauseGlobal => {
                let _ = client.try_unpause_global(&platform);
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        for (o, (org_id, _, _)) in orgs.iter().enumerate() {
            let count = client.log_count(org_id);
            assert_eq!(
                count,
                anchored[o].len() as u64,
                "INVARIANT VIOLATION: log_count diverged from accepted writes"
            );
            assert!(
                client.get_log(org_id, &(count + 1)).is_none(),
                "INVARIANT VIOLATION: entry beyond the sequence tip"
            );
        }
    }
});

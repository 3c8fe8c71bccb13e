use soroban_sdk::{log, token, Address, Env, String};

use crate::events::{
    self, ContributionEvent, RequestApprovedEvent, RequestCreatedEvent, RequestFinalizedEvent,
};
use crate::storage_types::*;
use crate::{extend_persistent, funding_token};

/// Build a fresh campaign record. The caller becomes its manager.
pub fn new_campaign(
    id: CampaignId,
    manager: Address,
    minimum_contribution: i128,
) -> Result<Campaign, CrowdfundError> {
    if minimum_contribution <= 0 {
        return Err(CrowdfundError::InvalidParameter);
    }

    Ok(Campaign {
        id,
        manager,
        minimum_contribution,
        balance: 0,
        approver_count: 0,
        request_count: 0,
    })
}

pub fn load(env: &Env, campaign_id: CampaignId) -> Result<Campaign, CrowdfundError> {
    env.storage()
        .persistent()
        .get(&PersistentKey::Campaign(campaign_id))
        .ok_or(CrowdfundError::CampaignNotFound)
}

pub fn save(env: &Env, campaign: &Campaign) {
    let key = PersistentKey::Campaign(campaign.id);
    env.storage().persistent().set(&key, campaign);
    extend_persistent(env, &key);
}

fn load_request(
    env: &Env,
    campaign: &Campaign,
    index: RequestIndex,
) -> Result<Request, CrowdfundError> {
    if index >= campaign.request_count {
        return Err(CrowdfundError::NotFound);
    }
    env.storage()
        .persistent()
        .get(&PersistentKey::Request(campaign.id, index))
        .ok_or(CrowdfundError::NotFound)
}

fn save_request(env: &Env, campaign_id: CampaignId, index: RequestIndex, request: &Request) {
    let key = PersistentKey::Request(campaign_id, index);
    env.storage().persistent().set(&key, request);
    extend_persistent(env, &key);
}

/// Strict majority of every approver the campaign has ever had.
/// Exactly half is not enough.
pub fn quorum_met(approval_count: u32, approver_count: u32) -> bool {
    (approval_count as u64) * 2 > approver_count as u64
}

pub fn is_approver(env: &Env, campaign_id: CampaignId, identity: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&PersistentKey::Approver(campaign_id, identity.clone()))
}

pub fn contribute(
    env: &Env,
    campaign_id: CampaignId,
    contributor: Address,
    amount: i128,
) -> Result<(), CrowdfundError> {
    contributor.require_auth();

    let mut campaign = load(env, campaign_id)?;
    if amount < campaign.minimum_contribution {
        return Err(CrowdfundError::InsufficientContribution);
    }

    let token_address = funding_token(env)?;
    let token_client = token::Client::new(env, &token_address);
    token_client.transfer(&contributor, &env.current_contract_address(), &amount);

    campaign.balance += amount;

    let approver_key = PersistentKey::Approver(campaign_id, contributor.clone());
    let new_approver = !env.storage().persistent().has(&approver_key);
    if new_approver {
        env.storage().persistent().set(&approver_key, &true);
        campaign.approver_count += 1;
    }
    extend_persistent(env, &approver_key);
    save(env, &campaign);

    events::emit_contribution(
        env,
        ContributionEvent {
            campaign_id,
            contributor,
            amount,
            new_approver,
        },
    );

    Ok(())
}

pub fn create_request(
    env: &Env,
    campaign_id: CampaignId,
    caller: Address,
    description: String,
    value: i128,
    recipient: Address,
) -> Result<RequestIndex, CrowdfundError> {
    caller.require_auth();

    let mut campaign = load(env, campaign_id)?;
    if caller != campaign.manager {
        return Err(CrowdfundError::Unauthorized);
    }
    if value <= 0 {
        return Err(CrowdfundError::InvalidParameter);
    }
    // Paying the contract itself would strand the tokens outside every pool.
    if recipient == env.current_contract_address() {
        return Err(CrowdfundError::InvalidParameter);
    }

    let index = campaign.request_count;
    let request = Request {
        description,
        value,
        recipient: recipient.clone(),
        complete: false,
        approval_count: 0,
    };
    save_request(env, campaign_id, index, &request);

    campaign.request_count += 1;
    save(env, &campaign);

    events::emit_request_created(
        env,
        RequestCreatedEvent {
            campaign_id,
            request_index: index,
            value,
            recipient,
        },
    );

    Ok(index)
}

pub fn approve_request(
    env: &Env,
    campaign_id: CampaignId,
    approver: Address,
    index: RequestIndex,
) -> Result<(), CrowdfundError> {
    approver.require_auth();

    let campaign = load(env, campaign_id)?;
    let mut request = load_request(env, &campaign, index)?;

    if !is_approver(env, campaign_id, &approver) {
        return Err(CrowdfundError::Unauthorized);
    }

    let approval_key = PersistentKey::Approval(campaign_id, index, approver.clone());
    if env.storage().persistent().has(&approval_key) {
        return Err(CrowdfundError::AlreadyApproved);
    }
    if request.complete {
        return Err(CrowdfundError::AlreadyFinalized);
    }

    env.storage().persistent().set(&approval_key, &true);
    extend_persistent(env, &approval_key);

    request.approval_count += 1;
    save_request(env, campaign_id, index, &request);

    events::emit_request_approved(
        env,
        RequestApprovedEvent {
            campaign_id,
            request_index: index,
            approver,
            approval_count: request.approval_count,
        },
    );

    Ok(())
}

pub fn finalize_request(
    env: &Env,
    campaign_id: CampaignId,
    caller: Address,
    index: RequestIndex,
) -> Result<(), CrowdfundError> {
    caller.require_auth();

    let mut campaign = load(env, campaign_id)?;
    if caller != campaign.manager {
        return Err(CrowdfundError::Unauthorized);
    }

    let mut request = load_request(env, &campaign, index)?;
    if request.complete {
        return Err(CrowdfundError::AlreadyFinalized);
    }

    if !quorum_met(request.approval_count, campaign.approver_count) {
        log!(
            env,
            "finalize rejected: quorum not met",
            campaign_id,
            index,
            request.approval_count,
            campaign.approver_count
        );
        return Err(CrowdfundError::QuorumNotMet);
    }

    // Funds come from the live pool; nothing is reserved at request time.
    if campaign.balance < request.value {
        log!(
            env,
            "finalize rejected: pool balance too low",
            campaign_id,
            index,
            campaign.balance,
            request.value
        );
        return Err(CrowdfundError::TransferFailed);
    }

    let token_address = funding_token(env)?;
    let token_client = token::Client::new(env, &token_address);
    token_client.transfer(
        &env.current_contract_address(),
        &request.recipient,
        &request.value,
    );

    campaign.balance -= request.value;
    request.complete = true;
    save_request(env, campaign_id, index, &request);
    save(env, &campaign);

    events::emit_request_finalized(
        env,
        RequestFinalizedEvent {
            campaign_id,
            request_index: index,
            recipient: request.recipient,
            value: request.value,
        },
    );

    Ok(())
}

pub fn get_request(
    env: &Env,
    campaign_id: CampaignId,
    index: RequestIndex,
) -> Result<Request, CrowdfundError> {
    let campaign = load(env, campaign_id)?;
    load_request(env, &campaign, index)
}

pub fn has_approved(
    env: &Env,
    campaign_id: CampaignId,
    index: RequestIndex,
    identity: Address,
) -> Result<bool, CrowdfundError> {
    let campaign = load(env, campaign_id)?;
    if index >= campaign.request_count {
        return Err(CrowdfundError::NotFound);
    }
    Ok(env
        .storage()
        .persistent()
        .has(&PersistentKey::Approval(campaign_id, index, identity)))
}

pub fn get_summary(env: &Env, campaign_id: CampaignId) -> Result<CampaignSummary, CrowdfundError> {
    let campaign = load(env, campaign_id)?;
    Ok(CampaignSummary {
        minimum_contribution: campaign.minimum_contribution,
        balance: campaign.balance,
        request_count: campaign.request_count,
        approver_count: campaign.approver_count,
        manager: campaign.manager,
    })
}

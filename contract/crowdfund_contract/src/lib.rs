#![no_std]

mod campaign;
mod events;
mod factory;
mod storage_types;


use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

pub use storage_types::{
    Campaign, CampaignId, CampaignSummary, CrowdfundError, Request, RequestIndex,
};
use storage_types::{DataKey, PersistentKey, FIRST_CAMPAIGN_ID, TTL_INSTANCE, TTL_PERSISTENT};

#[contract]
pub struct CrowdfundContract;

#[contractimpl]
impl CrowdfundContract {
    /// Configure the token every campaign of this deployment is funded in.
    pub fn initialize(env: Env, token: Address) -> Result<(), CrowdfundError> {
        if env.storage().instance().has(&DataKey::Token) {
            return Err(CrowdfundError::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Token, &token);
        env.storage()
            .instance()
            .set(&DataKey::NextCampaignId, &FIRST_CAMPAIGN_ID);
        extend_instance(&env);

        Ok(())
    }

    pub fn get_token(env: Env) -> Result<Address, CrowdfundError> {
        funding_token(&env)
    }

    // Factory

    /// Open a new campaign managed by `manager` and register it.
    pub fn create_campaign(
        env: Env,
        manager: Address,
        minimum_contribution: i128,
    ) -> Result<CampaignId, CrowdfundError> {
        factory::create_campaign(&env, manager, minimum_contribution)
    }

    pub fn get_deployed_campaigns(env: Env) -> Vec<CampaignId> {
        factory::get_deployed_campaigns(&env)
    }

    pub fn get_campaign_count(env: Env) -> u64 {
        factory::get_campaign_count(&env)
    }

    // Campaign

    /// Deposit `amount` of the funding token. Contributors meeting the
    /// minimum become approvers of the campaign.
    pub fn contribute(
        env: Env,
        campaign_id: CampaignId,
        contributor: Address,
        amount: i128,
    ) -> Result<(), CrowdfundError> {
        campaign::contribute(&env, campaign_id, contributor, amount)
    }

    /// Manager only. Returns the index of the new request.
    pub fn create_request(
        env: Env,
        campaign_id: CampaignId,
        caller: Address,
        description: String,
        value: i128,
        recipient: Address,
    ) -> Result<RequestIndex, CrowdfundError> {
        campaign::create_request(&env, campaign_id, caller, description, value, recipient)
    }

    pub fn approve_request(
        env: Env,
        campaign_id: CampaignId,
        approver: Address,
        request_index: RequestIndex,
    ) -> Result<(), CrowdfundError> {
        campaign::approve_request(&env, campaign_id, approver, request_index)
    }

    /// Manager only. Pays the request out of the pool once more than half of
    /// all approvers have voted for it.
    pub fn finalize_request(
        env: Env,
        campaign_id: CampaignId,
        caller: Address,
        request_index: RequestIndex,
    ) -> Result<(), CrowdfundError> {
        campaign::finalize_request(&env, campaign_id, caller, request_index)
    }

    pub fn is_approver(
        env: Env,
        campaign_id: CampaignId,
        identity: Address,
    ) -> Result<bool, CrowdfundError> {
        campaign::load(&env, campaign_id)?;
        Ok(campaign::is_approver(&env, campaign_id, &identity))
    }

    pub fn has_approved(
        env: Env,
        campaign_id: CampaignId,
        request_index: RequestIndex,
        identity: Address,
    ) -> Result<bool, CrowdfundError> {
        campaign::has_approved(&env, campaign_id, request_index, identity)
    }

    pub fn get_request(
        env: Env,
        campaign_id: CampaignId,
        request_index: RequestIndex,
    ) -> Result<Request, CrowdfundError> {
        campaign::get_request(&env, campaign_id, request_index)
    }

    pub fn get_requests_count(env: Env, campaign_id: CampaignId) -> Result<u32, CrowdfundError> {
        Ok(campaign::load(&env, campaign_id)?.request_count)
    }

    pub fn get_approvers_count(env: Env, campaign_id: CampaignId) -> Result<u32, CrowdfundError> {
        Ok(campaign::load(&env, campaign_id)?.approver_count)
    }

    pub fn get_summary(
        env: Env,
        campaign_id: CampaignId,
    ) -> Result<CampaignSummary, CrowdfundError> {
        campaign::get_summary(&env, campaign_id)
    }

    pub fn get_campaign(env: Env, campaign_id: CampaignId) -> Result<Campaign, CrowdfundError> {
        campaign::load(&env, campaign_id)
    }
}

// Helper functions
pub(crate) fn extend_instance(env: &Env) {
    env.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

pub(crate) fn extend_persistent(env: &Env, key: &PersistentKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

pub(crate) fn funding_token(env: &Env) -> Result<Address, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(CrowdfundError::NotInitialized)
}

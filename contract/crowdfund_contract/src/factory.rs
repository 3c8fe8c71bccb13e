use soroban_sdk::{Address, Env, Vec};

use crate::campaign;
use crate::events::{self, CampaignCreatedEvent};
use crate::storage_types::*;
use crate::{extend_instance, funding_token};

fn next_campaign_id(env: &Env) -> CampaignId {
    env.storage()
        .instance()
        .get(&DataKey::NextCampaignId)
        .unwrap_or(FIRST_CAMPAIGN_ID)
}

/// Ids are handed out densely from `FIRST_CAMPAIGN_ID` and a failed creation
/// rolls the counter back, so the counter alone describes the registry.
pub fn create_campaign(
    env: &Env,
    manager: Address,
    minimum_contribution: i128,
) -> Result<CampaignId, CrowdfundError> {
    manager.require_auth();
    funding_token(env)?;

    let campaign_id = next_campaign_id(env);

    let campaign = campaign::new_campaign(campaign_id, manager.clone(), minimum_contribution)?;
    campaign::save(env, &campaign);

    env.storage()
        .instance()
        .set(&DataKey::NextCampaignId, &(campaign_id + 1));
    extend_instance(env);

    events::emit_campaign_created(
        env,
        CampaignCreatedEvent {
            campaign_id,
            manager,
            minimum_contribution,
        },
    );

    Ok(campaign_id)
}

/// Every campaign created so far, oldest first.
pub fn get_deployed_campaigns(env: &Env) -> Vec<CampaignId> {
    let mut deployed = Vec::new(env);
    for campaign_id in FIRST_CAMPAIGN_ID..next_campaign_id(env) {
        deployed.push_back(campaign_id);
    }
    deployed
}

pub fn get_campaign_count(env: &Env) -> u64 {
    next_campaign_id(env) - FIRST_CAMPAIGN_ID
}

use soroban_sdk::{contracterror, contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Token,
    NextCampaignId,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    Approver(CampaignId, Address),
    Request(CampaignId, RequestIndex),
    Approval(CampaignId, RequestIndex, Address), // (Campaign, Request, Approver)
}

pub type CampaignId = u64;
pub type RequestIndex = u32;

// One funding pool and its manager
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub id: CampaignId,
    pub manager: Address,
    pub minimum_contribution: i128,
    pub balance: i128,          // Contributed and not yet transferred out
    pub approver_count: u32,
    pub request_count: u32,
}

// Spending proposal against a campaign's pool
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Request {
    pub description: String,
    pub value: i128,
    pub recipient: Address,
    pub complete: bool,
    pub approval_count: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignSummary {
    pub minimum_contribution: i128,
    pub balance: i128,
    pub request_count: u32,
    pub approver_count: u32,
    pub manager: Address,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdfundError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidParameter = 3,
    InsufficientContribution = 4,
    Unauthorized = 5,
    NotFound = 6,
    AlreadyApproved = 7,
    AlreadyFinalized = 8,
    QuorumNotMet = 9,
    TransferFailed = 10,
    CampaignNotFound = 11,
}

// Constants
pub const FIRST_CAMPAIGN_ID: CampaignId = 1;
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowListViewModel {
    pub workflows: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowMatchListViewModel {
    pub errorcode: String,
    pub site: String,
    pub total: u64,
    pub workflows: Vec<WorkflowMatchViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowMatchViewModel {
    pub workflow: String,
    pub count: u64,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupListViewModel {
    pub by: String,
    pub key: String,
    pub total: u64,
    pub groups: Vec<GroupViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupViewModel {
    pub name: String,
    pub total: u64,
    pub members: Vec<GroupMemberViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupMemberViewModel {
    pub name: String,
    pub total: u64,
}

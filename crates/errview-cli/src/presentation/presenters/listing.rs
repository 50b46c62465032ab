use crate::presentation::view_models::{
    GroupListViewModel, GroupMemberViewModel, GroupViewModel, WorkflowListViewModel,
    WorkflowMatchListViewModel, WorkflowMatchViewModel,
};
use errview_engine::{ErrorGroup, WorkflowMatch};
use std::collections::BTreeMap;

pub fn present_workflow_list(workflows: Vec<String>) -> WorkflowListViewModel {
    WorkflowListViewModel { workflows }
}

/// Largest count first; ties keep workflow order.
pub fn present_workflow_matches(
    errorcode: &str,
    site: &str,
    matches: Vec<WorkflowMatch>,
) -> WorkflowMatchListViewModel {
    let mut workflows: Vec<WorkflowMatchViewModel> = matches
        .into_iter()
        .map(|m| WorkflowMatchViewModel {
            workflow: m.workflow,
            count: m.count,
            steps: m.steps,
        })
        .collect();
    workflows.sort_by(|a, b| b.count.cmp(&a.count));

    WorkflowMatchListViewModel {
        errorcode: errorcode.to_string(),
        site: site.to_string(),
        total: workflows.iter().map(|w| w.count).sum(),
        workflows,
    }
}

pub fn present_groups(
    by: &str,
    key: &str,
    groups: BTreeMap<String, ErrorGroup>,
) -> GroupListViewModel {
    let groups: Vec<GroupViewModel> = groups
        .into_iter()
        .map(|(name, group)| GroupViewModel {
            name,
            total: group.total,
            members: group
                .subgroups
                .into_iter()
                .map(|(name, member)| GroupMemberViewModel {
                    name,
                    total: member.total,
                })
                .collect(),
        })
        .collect();

    GroupListViewModel {
        by: by.to_string(),
        key: key.to_string(),
        total: groups.iter().map(|g| g.total).sum(),
        groups,
    }
}

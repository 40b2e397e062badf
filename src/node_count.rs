use crate::models::{Node, NodeTally};

/// Tally active nodes by role
///
/// A full validator is not also counted as a basic one.
pub fn count_nodes(nodes: &[Node]) -> NodeTally {
    nodes
        .iter()
        .filter(|node| node.active)
        .fold(NodeTally::default(), |mut tally, node| {
            if node.is_full_validator {
                tally.full += 1;
            } else if node.is_validator {
                tally.basic += 1;
            } else {
                tally.watcher += 1;
            }
            tally
        })
}

/// Render the tally the way the node report prints it
pub fn format_tally(tally: &NodeTally) -> String {
    let rule = "--------------------";
    format!(
        "Results: ({} nodes)\n{rule}\nFull Validators: {}\nBasic Validators: {}\nOther: {}\n{rule}",
        tally.total(),
        tally.full,
        tally.basic,
        tally.watcher,
    )
}

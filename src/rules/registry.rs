use super::allocation_rules::{SliceNoCapacityRule, StringConcatLoopRule};
use super::goroutine_rules::GoroutineLeakRule;
use super::Rule;

/// Get all structural rules, in the order they run at each node
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(StringConcatLoopRule),
        Box::new(SliceNoCapacityRule),
        Box::new(GoroutineLeakRule),
    ]
}

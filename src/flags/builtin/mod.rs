pub mod wildcard_action;
pub mod wildcard_resource;

use super::FlagDetector;

/// All built-in detectors. Registration order is the flag emission order:
/// the action check runs before the resource check.
pub fn all_detectors() -> Vec<Box<dyn FlagDetector>> {
    vec![
        Box::new(wildcard_action::WildcardActionDetector),
        Box::new(wildcard_resource::WildcardResourceDetector),
    ]
}

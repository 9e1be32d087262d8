//! Gate policy validators

use super::trait_def::Validate;
use crate::auth::gate::GatePolicy;

impl Validate for GatePolicy {
    fn validate(&self) -> Result<(), String> {
        self.check_well_formed().map_err(|e| e.to_string())
    }
}

//! Applies arm requests from buttons, keys and shape picking to `ArmedTags`.
//!
//! Every successful arm asks for a floor re-check, so shapes already resting
//! on the ground that now match are destroyed without waiting for a new
//! contact. Disarming never re-checks.

use bevy::prelude::*;
use shape_drop::{ArmOutcome, ArmTag, ArmedTags};

use crate::collision::RecheckGround;
use crate::schedule::InGameSet;

pub fn plugin(app: &mut App) {
    app.add_event::<ArmRequest>()
        .add_systems(Update, apply_arm_requests.in_set(InGameSet::Arm));
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmRequest {
    /// Arm `tag`, or disarm it if it is already armed.
    Toggle(ArmTag),
    Clear,
}

/// Requests are applied in the order they were sent.
pub fn apply_arm_requests(
    mut requests: EventReader<ArmRequest>,
    mut armed: ResMut<ArmedTags>,
    mut recheck: EventWriter<RecheckGround>,
) {
    for request in requests.read() {
        match *request {
            ArmRequest::Clear => {
                armed.clear();
                info!("armed tags cleared");
            }
            ArmRequest::Toggle(tag) => match armed.arm(tag) {
                ArmOutcome::Disarmed => info!("disarmed {}", tag),
                ArmOutcome::Armed { evicted } => {
                    if let Some(old) = evicted {
                        info!("armed {}, evicted {}", tag, old);
                    } else {
                        info!("armed {}", tag);
                    }
                    recheck.send(RecheckGround);
                }
            },
        }
    }
}

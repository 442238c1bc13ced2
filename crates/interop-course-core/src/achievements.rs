//! Achievement engine: idempotent badge grants and the achievement board.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::content::CourseContent;
use crate::model::LearnerState;

pub const STANDARDS_SCHOLAR: &str = "Standards Scholar";
pub const INTEROPERABILITY_EXPERT: &str = "Interoperability Expert";
pub const CLINICAL_CONNECTOR: &str = "Clinical Connector";
pub const DIAGNOSTIC_DETECTIVE: &str = "Diagnostic Detective";
pub const FHIR_MASTER: &str = "FHIR Master";
pub const INTEGRATION_SPECIALIST: &str = "Integration Specialist";

/// How long an "achievement earned" notification stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Transient notification for a newly earned achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementNotice {
    pub id: String,
    /// `None` when the id is not in the catalog.
    pub icon: Option<String>,
    pub description: Option<String>,
    pub expires_after: Duration,
}

impl AchievementNotice {
    pub fn is_expired(&self, shown_for: Duration) -> bool {
        shown_for >= self.expires_after
    }
}

/// Grants achievements against a learner state.
///
/// Catalog point values are never applied here; callers add whatever bonus
/// the triggering event is worth.
pub struct AchievementEngine<'a> {
    state: &'a mut LearnerState,
    content: &'a CourseContent,
}

impl<'a> AchievementEngine<'a> {
    pub fn new(state: &'a mut LearnerState, content: &'a CourseContent) -> Self {
        Self { state, content }
    }

    /// Record the achievement. Returns `false` if it was already held.
    pub fn grant(&mut self, id: &str) -> bool {
        if self.state.has_achievement(id) {
            tracing::debug!(achievement = id, "achievement already held");
            return false;
        }
        if self.content.achievement(id).is_none() {
            tracing::warn!(achievement = id, "granting achievement that is not in the catalog");
        }
        self.state.achievements.push(id.to_string());
        tracing::debug!(achievement = id, "achievement granted");
        true
    }

    pub fn notice(&self, id: &str) -> AchievementNotice {
        notice(self.content, id)
    }
}

/// Build the notification for an achievement, with catalog metadata when
/// available.
pub fn notice(content: &CourseContent, id: &str) -> AchievementNotice {
    let entry = content.achievement(id);
    AchievementNotice {
        id: id.to_string(),
        icon: entry.map(|a| a.icon.clone()),
        description: entry.map(|a| a.description.clone()),
        expires_after: NOTICE_TTL,
    }
}

/// One row of the achievement board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeEntry {
    pub id: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub points: Option<u32>,
    pub earned: bool,
}

/// Every catalog achievement with its earned flag, followed by earned ids
/// the catalog does not know.
pub fn board(state: &LearnerState, content: &CourseContent) -> Vec<BadgeEntry> {
    let mut entries: Vec<BadgeEntry> = content
        .achievements
        .iter()
        .map(|a| BadgeEntry {
            id: a.id.clone(),
            icon: Some(a.icon.clone()),
            description: Some(a.description.clone()),
            points: Some(a.points),
            earned: state.has_achievement(&a.id),
        })
        .collect();

    entries.extend(
        state
            .achievements()
            .iter()
            .filter(|id| content.achievement(id).is_none())
            .map(|id| BadgeEntry {
                id: id.clone(),
                icon: None,
                description: None,
                points: None,
                earned: true,
            }),
    );

    entries
}

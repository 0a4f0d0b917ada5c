use serde::{Deserialize, Serialize};

use mud_core::{AttackResult, CharacterId, DeathOutcome, LevelGain, Promotion};

/// Outcomes of attacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A resolved attack, hit or miss.
    Attack {
        attacker: CharacterId,
        defender: CharacterId,
        result: AttackResult,
    },
    Death {
        killer: Option<CharacterId>,
        outcome: DeathOutcome,
    },
}

/// Level and class changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionEvent {
    LevelUp {
        character: CharacterId,
        gain: LevelGain,
    },
    Promotion {
        character: CharacterId,
        promotion: Promotion,
    },
}

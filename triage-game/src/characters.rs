use serde::{Deserialize, Serialize};

use crate::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    ServiceDeskAgent,
    IncidentManager,
    ProblemManager,
    ChangeManager,
    ServiceOwner,
    TechnicalSpecialist,
    ServiceLevelManager,
}

impl Role {
    pub const ALL: [Self; 7] = [
        Self::ServiceDeskAgent,
        Self::IncidentManager,
        Self::ProblemManager,
        Self::ChangeManager,
        Self::ServiceOwner,
        Self::TechnicalSpecialist,
        Self::ServiceLevelManager,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ServiceDeskAgent => "service_desk_agent",
            Self::IncidentManager => "incident_manager",
            Self::ProblemManager => "problem_manager",
            Self::ChangeManager => "change_manager",
            Self::ServiceOwner => "service_owner",
            Self::TechnicalSpecialist => "technical_specialist",
            Self::ServiceLevelManager => "service_level_manager",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStart {
    pub sla: i32,
    pub morale: i32,
    pub quality: i32,
}

impl From<CharacterStart> for Stats {
    fn from(start: CharacterStart) -> Self {
        Self::new(start.sla, start.morale, start.quality)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub desc: String,
    #[serde(default)]
    pub theme: String,
    pub start: CharacterStart,
}

/// Playable characters in role order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CharacterList(pub Vec<Character>);

impl CharacterList {
    #[must_use]
    pub const fn empty() -> Self {
        Self(vec![])
    }

    /// Build a list ordered by [`Role::ALL`], keeping authoring order within a role.
    #[must_use]
    pub fn ordered(mut characters: Vec<Character>) -> Self {
        characters.sort_by_key(|c| Role::ALL.iter().position(|role| *role == c.role));
        Self(characters)
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Character> {
        self.0.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Character> {
        self.0.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a CharacterList {
    type Item = &'a Character;
    type IntoIter = std::slice::Iter<'a, Character>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(id: &str, role: Role) -> Character {
        Character {
            id: id.to_string(),
            name: id.to_uppercase(),
            role,
            desc: String::new(),
            theme: String::new(),
            start: CharacterStart {
                sla: 100,
                morale: 90,
                quality: 60,
            },
        }
    }

    #[test]
    fn character_json_parsing() {
        let json = r#"[{
            "id": "mika",
            "name": "Mika",
            "role": "CHANGE_MANAGER",
            "desc": "Keeps the CAB honest.",
            "start": { "sla": 90, "morale": 80, "quality": 70 }
        }]"#;
        let list: CharacterList = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 1);
        let mika = list.get_by_id("mika").unwrap();
        assert_eq!(mika.role, Role::ChangeManager);
        assert_eq!(Stats::from(mika.start), Stats::new(90, 80, 70));
    }

    #[test]
    fn ordered_follows_role_order() {
        let list = CharacterList::ordered(vec![
            character("owner", Role::ServiceOwner),
            character("agent", Role::ServiceDeskAgent),
            character("tech", Role::TechnicalSpecialist),
        ]);
        let ids: Vec<_> = list.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["agent", "owner", "tech"]);
        let into_ids: Vec<_> = (&list).into_iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, into_ids);
    }

    #[test]
    fn start_stats_are_clamped() {
        let start = CharacterStart {
            sla: 140,
            morale: -2,
            quality: 50,
        };
        assert_eq!(Stats::from(start), Stats::new(100, 0, 50));
    }

    #[test]
    fn empty_list_helpers_are_consistent() {
        let empty = CharacterList::empty();
        assert!(empty.is_empty());
        assert!(empty.get_by_id("mika").is_none());
    }
}

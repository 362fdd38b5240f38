//! Группировка найденных клиентов для уточнения варианта.

use contracts::domain::a001_client::Client;
use contracts::domain::a002_product::ProductId;
use std::collections::HashMap;

/// Ключ группы: название + продукт (дубли филиалов схлопываются)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub display_name: String,
    pub product_ref: Option<ProductId>,
}

impl GroupKey {
    fn of(client: &Client) -> Self {
        Self {
            display_name: client.display_name.trim().to_lowercase(),
            product_ref: client.product_ref.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateGroup {
    pub key: GroupKey,
    pub members: Vec<Client>,
}

/// Группы в порядке первого появления; внутри группы порядок сохраняется
pub fn group_candidates(candidates: Vec<Client>) -> Vec<CandidateGroup> {
    let mut groups: Vec<CandidateGroup> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for client in candidates {
        let key = GroupKey::of(&client);
        match index.get(&key) {
            Some(&i) => groups[i].members.push(client),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(CandidateGroup {
                    key,
                    members: vec![client],
                });
            }
        }
    }

    groups
}

/// Плоский список всех участников групп
pub fn flatten_groups(groups: Vec<CandidateGroup>) -> Vec<Client> {
    groups.into_iter().flat_map(|g| g.members).collect()
}

/// Единственный кандидат, если выбор не нужен
pub fn single_candidate(groups: &[CandidateGroup]) -> Option<&Client> {
    match groups {
        [only] if only.members.len() == 1 => only.members.first(),
        _ => None,
    }
}

use serde::{Deserialize, Serialize};

use super::MemberId;

/// 会員
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub contact: String,
}

/// 採番前の会員（登録・更新の入力）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub contact: String,
}

impl NewMember {
    pub fn with_id(self, id: MemberId) -> Member {
        Member {
            id,
            name: self.name,
            contact: self.contact,
        }
    }
}

//! The members table: local search, role and status filters, sorting and
//! paging over a fixed sample set.

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;

use crate::error::ModelError;
use crate::model::{Collation, FieldValue, LocalListController, Record, SortSpec};

/// Rows per page.
pub const MEMBERS_PAGE_SIZE: usize = 5;

/// Field names exposed by [`Member`].
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const ROLE: &str = "role";
    pub const STATUS: &str = "status";
    pub const JOIN_DATE: &str = "joinDate";
}

/// Roles offered by the role filter.
pub const MEMBER_ROLES: [&str; 3] = ["관리자", "사용자", "매니저"];

/// Membership status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
}

impl MemberStatus {
    pub const ALL: [MemberStatus; 3] = [Self::Active, Self::Inactive, Self::Pending];

    /// The raw value used for filtering and sorting.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "활성",
            Self::Inactive => "비활성",
            Self::Pending => "대기중",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A row of the members table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: MemberStatus,
    pub join_date: NaiveDate,
}

impl Record for Member {
    type Id = u32;

    const SEARCH_FIELDS: &'static [&'static str] = &[fields::NAME, fields::EMAIL];

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Number(f64::from(self.id)),
            fields::NAME => FieldValue::text(&self.name),
            fields::EMAIL => FieldValue::text(&self.email),
            fields::ROLE => FieldValue::text(&self.role),
            fields::STATUS => FieldValue::text(self.status.as_str()),
            fields::JOIN_DATE => {
                FieldValue::Text(Cow::Owned(self.join_date.format("%Y-%m-%d").to_string()))
            }
            _ => FieldValue::Null,
        }
    }
}

/// The eight sample members.
pub fn sample_members() -> Vec<Member> {
    const ROWS: [(u32, &str, &str, &str, MemberStatus, (i32, u32, u32)); 8] = [
        (1, "홍길동", "hong@example.com", "관리자", MemberStatus::Active, (2024, 1, 15)),
        (2, "김영희", "kim@example.com", "사용자", MemberStatus::Active, (2024, 2, 20)),
        (3, "이순신", "lee@example.com", "사용자", MemberStatus::Inactive, (2024, 3, 10)),
        (4, "박지성", "park@example.com", "매니저", MemberStatus::Pending, (2024, 4, 5)),
        (5, "최민준", "choi@example.com", "사용자", MemberStatus::Active, (2024, 5, 12)),
        (6, "정은정", "jung@example.com", "사용자", MemberStatus::Active, (2024, 6, 18)),
        (7, "신동협", "shin@example.com", "매니저", MemberStatus::Inactive, (2024, 7, 22)),
        (8, "우지현", "woo@example.com", "사용자", MemberStatus::Active, (2024, 8, 30)),
    ];

    ROWS.iter()
        .filter_map(|&(id, name, email, role, status, (y, m, d))| {
            Some(Member {
                id,
                name: name.to_string(),
                email: email.to_string(),
                role: role.to_string(),
                status,
                join_date: NaiveDate::from_ymd_opt(y, m, d)?,
            })
        })
        .collect()
}

/// Controller for the members table.
///
/// Starts sorted by join date, newest first.
pub struct TableExample {
    list: LocalListController<Member>,
}

impl TableExample {
    /// The sample members with the default page size.
    pub fn new(collation: Collation) -> Result<Self, ModelError> {
        Self::with_members(sample_members(), MEMBERS_PAGE_SIZE, collation)
    }

    pub fn with_members(
        members: Vec<Member>,
        page_size: usize,
        collation: Collation,
    ) -> Result<Self, ModelError> {
        let list = LocalListController::new(
            members,
            page_size,
            SortSpec::descending(fields::JOIN_DATE),
            collation,
        )?;
        Ok(Self { list })
    }

    pub fn list(&self) -> &LocalListController<Member> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut LocalListController<Member> {
        &mut self.list
    }

    /// Search names and emails.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.list.set_search(query);
    }

    /// Restrict to one role, or show all roles with `None`.
    pub fn set_role_filter(&mut self, role: Option<&str>) {
        match role {
            Some(role) => self.list.set_field_filter(fields::ROLE, role),
            None => self.list.clear_field_filter(fields::ROLE),
        }
    }

    /// Restrict to one status, or show all with `None`.
    pub fn set_status_filter(&mut self, status: Option<MemberStatus>) {
        match status {
            Some(status) => self.list.set_field_filter(fields::STATUS, status.as_str()),
            None => self.list.clear_field_filter(fields::STATUS),
        }
    }

    /// Column header click.
    pub fn toggle_sort(&mut self, key: &str) {
        self.list.toggle_sort(key);
    }

    pub fn go_to_page(&mut self, n: usize) -> bool {
        self.list.go_to_page(n)
    }

    pub fn visible(&self) -> Vec<&Member> {
        self.list.visible()
    }
}

impl fmt::Debug for TableExample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableExample")
            .field("sort", self.list.sort())
            .field("current_page", &self.list.current_page())
            .field("total_matching", &self.list.total_matching())
            .finish()
    }
}

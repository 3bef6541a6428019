//! 申请面板状态
//!
//! 招聘方修改状态采用先确认后更新：请求成功后才按 id 修改对应行，
//! 失败时行保持原状态。

use crate::components::notice::Notice;
use crate::error::ApiError;
use fresherjobs_shared::protocol::StatusUpdated;
use fresherjobs_shared::{Application, ApplicationId, ApplicationStatus, Role};
use std::collections::{HashMap, HashSet};

pub const MSG_UPDATE_FAILED: &str = "Failed to update status. Please try again.";
pub const ANONYMOUS_APPLICANT: &str = "Anonymous Student";

/// 申请列表，按 id 建立索引
#[derive(Debug, Clone, Default)]
pub struct ApplicationBoard {
    rows: Vec<Application>,
    index: HashMap<ApplicationId, usize>,
}

impl ApplicationBoard {
    pub fn new(rows: Vec<Application>) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .map(|(pos, app)| (app.id, pos))
            .collect();
        Self { rows, index }
    }

    pub fn rows(&self) -> &[Application] {
        &self.rows
    }

    pub fn get(&self, id: ApplicationId) -> Option<&Application> {
        self.index.get(&id).map(|&pos| &self.rows[pos])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 只修改 id 匹配的那一行；id 不存在时返回 false
    pub fn patch_status(&mut self, id: ApplicationId, status: ApplicationStatus) -> bool {
        match self.index.get(&id) {
            Some(&pos) => {
                self.rows[pos].status = status;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardLoad {
    Loading,
    Loaded,
    Failed(String),
}

/// 页面标题等按角色区分的文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub section: &'static str,
    pub empty: &'static str,
    pub empty_action: &'static str,
}

impl DashboardCopy {
    pub fn for_role(role: Role) -> Self {
        if role.is_recruiter() {
            Self {
                title: "Recruiter Dashboard",
                subtitle: "Review the candidates who have applied to your job postings.",
                section: "Recent Applicants",
                empty: "No one has applied to your jobs yet.",
                empty_action: "Post a Job",
            }
        } else {
            Self {
                title: "Student Dashboard",
                subtitle: "Track your job applications and career progress.",
                section: "Recent Applications",
                empty: "You haven't applied to any jobs yet.",
                empty_action: "Find Jobs",
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub role: Role,
    pub load: BoardLoad,
    pub board: ApplicationBoard,
    /// 正在更新的行
    pending: HashSet<ApplicationId>,
    pub notice: Option<Notice>,
    /// 每次设置通知时递增，过期计时器只清除自己对应的那条
    notice_ticket: u64,
}

impl DashboardState {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            load: BoardLoad::Loading,
            board: ApplicationBoard::default(),
            pending: HashSet::new(),
            notice: None,
            notice_ticket: 0,
        }
    }

    pub fn resolve_load(&mut self, result: Result<Vec<Application>, ApiError>) {
        match result {
            Ok(rows) => {
                self.board = ApplicationBoard::new(rows);
                self.load = BoardLoad::Loaded;
            }
            Err(e) => self.load = BoardLoad::Failed(e.user_message()),
        }
    }

    pub fn can_manage(&self) -> bool {
        self.role.is_recruiter()
    }

    pub fn is_pending(&self, id: ApplicationId) -> bool {
        self.pending.contains(&id)
    }

    /// 开始一次状态修改；非招聘方、行不存在或该行已在更新中时返回 false
    pub fn begin_update(&mut self, id: ApplicationId) -> bool {
        if !self.can_manage() || self.board.get(id).is_none() {
            return false;
        }
        self.pending.insert(id)
    }

    /// 以后端返回的状态为准修改对应行
    ///
    /// 设置了通知时返回其票号，交给过期计时器使用。
    pub fn resolve_update(
        &mut self,
        id: ApplicationId,
        result: Result<StatusUpdated, ApiError>,
    ) -> Option<u64> {
        self.pending.remove(&id);
        let notice = match result {
            Ok(updated) => {
                self.board.patch_status(id, updated.status);
                if updated.message.is_empty() {
                    return None;
                }
                Notice::success(updated.message)
            }
            Err(e) => {
                log::warn!("[Dashboard] status update for #{} failed: {}", id, e);
                let text = e
                    .backend_message()
                    .unwrap_or_else(|| MSG_UPDATE_FAILED.to_string());
                Notice::error(text)
            }
        };
        self.notice_ticket += 1;
        self.notice = Some(notice);
        Some(self.notice_ticket)
    }

    /// 只有票号仍是最新时才清除通知
    pub fn expire_notice(&mut self, ticket: u64) {
        if ticket == self.notice_ticket {
            self.notice = None;
        }
    }

    pub fn copy(&self) -> DashboardCopy {
        DashboardCopy::for_role(self.role)
    }
}

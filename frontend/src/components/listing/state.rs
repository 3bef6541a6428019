//! 职位列表页状态
//!
//! 每次请求领取一个递增的票号，只有最新票号的响应才会被应用。

use crate::error::ApiError;
use fresherjobs_shared::{JobPosting, Page};

pub const HEADING_LATEST: &str = "Latest openings";

/// 一次列表请求的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingFetch {
    /// 列表请求；None 为未过滤
    Search(Option<String>),
    /// 按游标翻页
    Cursor(String),
}

/// 带票号的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticketed {
    pub ticket: u64,
    pub fetch: ListingFetch,
}

/// 列表区域的展示形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingView {
    Loading,
    Error,
    Empty,
    Results,
}

#[derive(Debug, Clone, Default)]
pub struct ListingState {
    /// 输入框内容
    pub query: String,
    /// 当前结果对应的搜索词
    pub committed: Option<String>,
    pub jobs: Vec<JobPosting>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    latest_ticket: u64,
    keystroke: u64,
}

fn normalise(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ListingState {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self, fetch: ListingFetch) -> Ticketed {
        self.latest_ticket += 1;
        self.loading = true;
        self.error = None;
        Ticketed {
            ticket: self.latest_ticket,
            fetch,
        }
    }

    /// 提交当前输入框内容；空白等同于未过滤
    pub fn begin_search(&mut self) -> Ticketed {
        self.committed = normalise(&self.query);
        let search = self.committed.clone();
        self.issue(ListingFetch::Search(search))
    }

    /// 清空搜索词并重新请求未过滤列表
    pub fn begin_clear(&mut self) -> Ticketed {
        self.query.clear();
        self.committed = None;
        self.issue(ListingFetch::Search(None))
    }

    pub fn begin_next(&mut self) -> Option<Ticketed> {
        let cursor = self.next.clone()?;
        Some(self.issue(ListingFetch::Cursor(cursor)))
    }

    pub fn begin_previous(&mut self) -> Option<Ticketed> {
        let cursor = self.previous.clone()?;
        Some(self.issue(ListingFetch::Cursor(cursor)))
    }

    /// 应用响应；票号过期时丢弃并返回 false
    pub fn resolve(&mut self, ticket: u64, result: Result<Page<JobPosting>, ApiError>) -> bool {
        if ticket != self.latest_ticket {
            log::debug!(
                "[Listing] dropping stale response #{} (latest #{})",
                ticket,
                self.latest_ticket
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                // 结果和两个游标一起替换
                self.jobs = page.results;
                self.next = page.next;
                self.previous = page.previous;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.user_message());
            }
        }
        true
    }

    // =========================================================
    // 输入防抖
    // =========================================================

    /// 记录一次按键，返回本次按键的序号
    pub fn note_keystroke(&mut self, query: String) -> u64 {
        self.query = query;
        self.keystroke += 1;
        self.keystroke
    }

    /// 防抖到期时判断这次按键是否仍是最后一次，且输入内容与已提交的不同
    pub fn debounce_due(&self, keystroke: u64) -> bool {
        keystroke == self.keystroke && normalise(&self.query) != self.committed
    }

    // =========================================================
    // 派生展示
    // =========================================================

    pub fn view(&self) -> ListingView {
        if self.loading && self.jobs.is_empty() {
            ListingView::Loading
        } else if self.error.is_some() {
            ListingView::Error
        } else if self.jobs.is_empty() {
            ListingView::Empty
        } else {
            ListingView::Results
        }
    }

    pub fn can_go_next(&self) -> bool {
        self.next.is_some() && !self.loading
    }

    pub fn can_go_previous(&self) -> bool {
        self.previous.is_some() && !self.loading
    }

    /// 两个游标都为空时隐藏翻页
    pub fn show_pager(&self) -> bool {
        self.next.is_some() || self.previous.is_some()
    }

    pub fn heading(&self) -> String {
        match &self.committed {
            Some(q) => format!("Search results for \"{}\"", q),
            None => HEADING_LATEST.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresherjobs_shared::Timestamp;

    fn job(id: u64, title: &str) -> JobPosting {
        JobPosting {
            id,
            title: title.to_string(),
            description: String::new(),
            requirements: String::new(),
            job_type: "Full-time".into(),
            location: "Remote".into(),
            salary_range: None,
            recruiter_name: "Acme".into(),
            recruiter_id: None,
            posted_at: Timestamp::new("2026-03-05T10:15:30Z"),
            is_active: true,
        }
    }

    fn page(jobs: Vec<JobPosting>, next: Option<&str>, previous: Option<&str>) -> Page<JobPosting> {
        Page {
            results: jobs,
            next: next.map(str::to_string),
            previous: previous.map(str::to_string),
            count: None,
        }
    }

    #[test]
    fn test_initial_load_is_unfiltered() {
        let mut state = ListingState::new();
        let req = state.begin_search();
        assert_eq!(req.fetch, ListingFetch::Search(None));
        assert_eq!(state.view(), ListingView::Loading);
        assert_eq!(state.heading(), HEADING_LATEST);
    }

    #[test]
    fn test_last_page_disables_next_only() {
        let mut state = ListingState::new();
        let req = state.begin_search();
        state.resolve(
            req.ticket,
            Ok(page(
                vec![job(1, "A")],
                None,
                Some("http://api.test/api/jobs/?page=1"),
            )),
        );
        assert!(!state.can_go_next());
        assert!(state.can_go_previous());
        assert!(state.show_pager());
        assert!(state.begin_next().is_none());

        let req = state.begin_previous().unwrap();
        assert_eq!(
            req.fetch,
            ListingFetch::Cursor("http://api.test/api/jobs/?page=1".into())
        );
    }

    #[test]
    fn test_pager_hidden_without_cursors() {
        let mut state = ListingState::new();
        let req = state.begin_search();
        state.resolve(req.ticket, Ok(page(vec![job(1, "A")], None, None)));
        assert!(!state.show_pager());
    }

    #[test]
    fn test_zero_results_is_empty_not_error() {
        let mut state = ListingState::new();
        state.query = "react".into();
        let req = state.begin_search();
        assert_eq!(req.fetch, ListingFetch::Search(Some("react".into())));

        state.resolve(req.ticket, Ok(page(vec![], None, None)));
        assert_eq!(state.view(), ListingView::Empty);
        assert!(state.error.is_none());
        assert_eq!(state.heading(), "Search results for \"react\"");
    }

    #[test]
    fn test_out_of_order_responses_keep_latest_search() {
        let mut state = ListingState::new();
        state.query = "a".into();
        let first = state.begin_search();
        state.query = "ab".into();
        let second = state.begin_search();

        assert!(state.resolve(second.ticket, Ok(page(vec![job(2, "ab job")], None, None))));
        assert!(!state.resolve(first.ticket, Ok(page(vec![job(1, "a job")], None, None))));

        assert_eq!(state.jobs.len(), 1);
        assert_eq!(state.jobs[0].title, "ab job");
        assert_eq!(state.committed.as_deref(), Some("ab"));
    }

    #[test]
    fn test_error_keeps_previous_results() {
        let mut state = ListingState::new();
        let req = state.begin_search();
        state.resolve(req.ticket, Ok(page(vec![job(1, "A")], Some("n"), None)));

        let req = state.begin_next().unwrap();
        state.resolve(req.ticket, Err(ApiError::Network("offline".into())));
        assert_eq!(state.view(), ListingView::Error);
        assert_eq!(state.jobs.len(), 1);
        assert!(state.can_go_next());
    }

    #[test]
    fn test_clear_resets_query() {
        let mut state = ListingState::new();
        state.query = "rust".into();
        state.begin_search();
        let req = state.begin_clear();
        assert_eq!(req.fetch, ListingFetch::Search(None));
        assert!(state.query.is_empty());
        assert_eq!(state.heading(), HEADING_LATEST);
    }

    #[test]
    fn test_debounce_fires_only_for_last_keystroke() {
        let mut state = ListingState::new();
        let k1 = state.note_keystroke("r".into());
        let k2 = state.note_keystroke("ru".into());
        assert!(!state.debounce_due(k1));
        assert!(state.debounce_due(k2));

        state.begin_search();
        // 已提交的内容不再重复请求
        assert!(!state.debounce_due(k2));

        let k3 = state.note_keystroke("ru ".into());
        assert!(!state.debounce_due(k3));
    }
}

//! 个人资料表单状态

use crate::components::notice::Notice;
use crate::error::ApiError;
use fresherjobs_shared::{Profile, Session};

pub const MSG_PROFILE_SAVED: &str = "Profile updated successfully!";
pub const MSG_PROFILE_SAVE_FAILED: &str = "Failed to update profile. Please try again.";

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FullName,
    University,
    Degree,
    GraduationYear,
    Skills,
    PortfolioLink,
    CompanyName,
    Location,
    AboutCompany,
    CompanyWebsite,
}

impl ProfileField {
    pub const STUDENT_FIELDS: [ProfileField; 6] = [
        ProfileField::FullName,
        ProfileField::University,
        ProfileField::Degree,
        ProfileField::GraduationYear,
        ProfileField::Skills,
        ProfileField::PortfolioLink,
    ];

    pub const RECRUITER_FIELDS: [ProfileField; 4] = [
        ProfileField::CompanyName,
        ProfileField::Location,
        ProfileField::AboutCompany,
        ProfileField::CompanyWebsite,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::FullName => "Full Name",
            ProfileField::University => "University / College",
            ProfileField::Degree => "Degree",
            ProfileField::GraduationYear => "Grad Year",
            ProfileField::Skills => "Technical Skills",
            ProfileField::PortfolioLink => "Portfolio Link",
            ProfileField::CompanyName => "Company Name",
            ProfileField::Location => "Headquarters / Location",
            ProfileField::AboutCompany => "About the Company",
            ProfileField::CompanyWebsite => "Company Website",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            ProfileField::FullName => "e.g. Aman Kumar",
            ProfileField::University => "e.g. KIIT University",
            ProfileField::Degree => "e.g. B.Tech, MCA",
            ProfileField::GraduationYear => "2026",
            ProfileField::Skills => "e.g. Python, React, Django, SQL (comma separated)",
            ProfileField::PortfolioLink => "https://github.com/you",
            ProfileField::CompanyName => "e.g. TechNova Solutions",
            ProfileField::Location => "e.g. Bangalore, India",
            ProfileField::AboutCompany => "Describe what your company does...",
            ProfileField::CompanyWebsite => "https://example.com",
        }
    }

    /// 使用多行输入框
    pub fn is_multiline(&self) -> bool {
        matches!(self, ProfileField::Skills | ProfileField::AboutCompany)
    }

    pub fn get<'a>(&self, profile: &'a Profile) -> &'a str {
        match self {
            ProfileField::FullName => &profile.full_name,
            ProfileField::University => &profile.university,
            ProfileField::Degree => &profile.degree,
            ProfileField::GraduationYear => &profile.graduation_year,
            ProfileField::Skills => &profile.skills,
            ProfileField::PortfolioLink => &profile.portfolio_link,
            ProfileField::CompanyName => &profile.company_name,
            ProfileField::Location => &profile.location,
            ProfileField::AboutCompany => &profile.about_company,
            ProfileField::CompanyWebsite => &profile.company_website,
        }
    }

    pub fn set(&self, profile: &mut Profile, value: String) {
        let slot = match self {
            ProfileField::FullName => &mut profile.full_name,
            ProfileField::University => &mut profile.university,
            ProfileField::Degree => &mut profile.degree,
            ProfileField::GraduationYear => &mut profile.graduation_year,
            ProfileField::Skills => &mut profile.skills,
            ProfileField::PortfolioLink => &mut profile.portfolio_link,
            ProfileField::CompanyName => &mut profile.company_name,
            ProfileField::Location => &mut profile.location,
            ProfileField::AboutCompany => &mut profile.about_company,
            ProfileField::CompanyWebsite => &mut profile.company_website,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub profile: Profile,
    pub loading: bool,
    pub saving: bool,
    pub notice: Option<Notice>,
    show_student: bool,
    show_recruiter: bool,
    notice_ticket: u64,
}

impl ProfileForm {
    /// 两个标志都为 true 时两组字段都显示
    pub fn new(session: &Session) -> Self {
        Self {
            loading: true,
            show_student: session.is_student,
            show_recruiter: session.is_recruiter,
            ..Self::default()
        }
    }

    pub fn shows_student_fields(&self) -> bool {
        self.show_student
    }

    pub fn shows_recruiter_fields(&self) -> bool {
        self.show_recruiter
    }

    /// 合并加载结果；失败时保持空表单
    pub fn resolve_load(&mut self, result: Result<Profile, ApiError>) {
        self.loading = false;
        match result {
            Ok(profile) => self.profile = profile,
            Err(e) => {
                log::warn!("[Profile] load failed: {}", e);
                self.notice = Some(Notice::error(e.user_message()));
            }
        }
    }

    pub fn update(&mut self, field: ProfileField, value: String) {
        field.set(&mut self.profile, value);
    }

    /// 开始保存；正在保存时返回 None
    pub fn begin_save(&mut self) -> Option<Profile> {
        if self.saving {
            return None;
        }
        self.saving = true;
        self.notice = None;
        self.notice_ticket += 1;
        Some(self.profile.clone())
    }

    /// 成功时返回提示的票号，页面据此在超时后清除提示
    pub fn resolve_save(&mut self, result: Result<Profile, ApiError>) -> Option<u64> {
        self.saving = false;
        match result {
            Ok(saved) => {
                self.profile = saved;
                self.notice = Some(Notice::success(MSG_PROFILE_SAVED));
                Some(self.notice_ticket)
            }
            Err(e) => {
                log::warn!("[Profile] save failed: {}", e);
                self.notice = Some(Notice::error(MSG_PROFILE_SAVE_FAILED));
                None
            }
        }
    }

    /// 只清除仍属于该票号的成功提示
    pub fn expire_notice(&mut self, ticket: u64) {
        if ticket == self.notice_ticket && self.notice.as_ref().is_some_and(|n| !n.is_error) {
            self.notice = None;
        }
    }
}

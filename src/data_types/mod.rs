pub mod demand_data_types;
pub mod dish_data_types;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Demand,
    Menu,
    AiDishes,
    Reports,
    Settings,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Demand,
        Page::Menu,
        Page::AiDishes,
        Page::Reports,
        Page::Settings,
    ];

    pub fn route(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Demand => "/demand",
            Page::Menu => "/menu-optimization",
            Page::AiDishes => "/ai-dish",
            Page::Reports => "/reports",
            Page::Settings => "/settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Demand => "Demand Analysis",
            Page::Menu => "Menu Optimize",
            Page::AiDishes => "AI Dishes",
            Page::Reports => "Reports",
            Page::Settings => "Settings",
        }
    }
}

/// A file picked from disk, as the pages hold it until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}

/// `Idle -> Submitting -> Idle`, shared by every page that talks to the backend.
/// While `Submitting`, new submissions are refused rather than queued.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Submitting,
}

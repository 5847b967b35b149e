#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Route {
    Home,
    Terms,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        match normalized {
            "" => Route::Home,
            "/terms" => Route::Terms,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::Terms => "/terms",
            Route::NotFound(path) => path,
        }
    }
}

/// Panels reachable inside the home route without changing the route.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum View {
    Calculator,
    FallAsleep,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FallAsleepTab {
    Insomnia,
    Foods,
    Sos,
}

impl FallAsleepTab {
    pub const ALL: [FallAsleepTab; 3] = [
        FallAsleepTab::Insomnia,
        FallAsleepTab::Foods,
        FallAsleepTab::Sos,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FallAsleepTab::Insomnia => "Insomnia Relief",
            FallAsleepTab::Foods => "Sleep Foods",
            FallAsleepTab::Sos => "Sleep SOS",
        }
    }
}

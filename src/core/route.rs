//! Locations and the views they select

/// Every view the shell can show; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Blockchain,
    ConductTransaction,
    TransactionPool,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Home,
        Route::Blockchain,
        Route::ConductTransaction,
        Route::TransactionPool,
    ];

    /// Map a location such as `/blockchain` to its view.
    pub fn from_location(location: &str) -> Option<Route> {
        let trimmed = location.trim();
        let path = trimmed.trim_end_matches('/');
        match path {
            "" => Some(Route::Home),
            "/blockchain" => Some(Route::Blockchain),
            "/conduct-transaction" => Some(Route::ConductTransaction),
            "/transaction-pool" => Some(Route::TransactionPool),
            _ => None,
        }
    }

    pub fn location(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Blockchain => "/blockchain",
            Route::ConductTransaction => "/conduct-transaction",
            Route::TransactionPool => "/transaction-pool",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Blockchain => "Blockchain",
            Route::ConductTransaction => "Conduct a Transaction",
            Route::TransactionPool => "Transaction Pool",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Route::Home => '1',
            Route::Blockchain => '2',
            Route::ConductTransaction => '3',
            Route::TransactionPool => '4',
        }
    }

    pub fn from_shortcut(c: char) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.shortcut() == c)
    }
}

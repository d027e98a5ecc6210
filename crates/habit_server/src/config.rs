use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use habit_core::{date::parse_calendar_date, Clock, FixedClock, HabitService, SystemClock};
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind: IpAddr,
    pub(crate) port: u16,
    pub(crate) seed_demo_data: bool,
    pub(crate) pinned_today: Option<NaiveDate>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(port) = lookup("HABITS_PORT").or_else(|| lookup("PORT")) {
            match port.trim().parse::<u16>() {
                Ok(value) => config.port = value,
                Err(_) => warn!(%port, "ignoring invalid port"),
            }
        }
        if let Some(bind) = lookup("HABITS_BIND") {
            match bind.trim().parse::<IpAddr>() {
                Ok(addr) => config.bind = addr,
                Err(_) => warn!(%bind, "ignoring invalid bind address"),
            }
        }
        if let Some(seed) = lookup("HABITS_SEED") {
            match parse_bool(&seed) {
                Some(value) => config.seed_demo_data = value,
                None => warn!(%seed, "ignoring invalid HABITS_SEED"),
            }
        }
        if let Some(today) = lookup("HABITS_TODAY") {
            match parse_calendar_date(&today) {
                Ok(date) => {
                    info!(%date, "pinning clock");
                    config.pinned_today = Some(date);
                }
                Err(err) => warn!(%err, "ignoring HABITS_TODAY"),
            }
        }
        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.pinned_today {
            Some(today) => Arc::new(FixedClock::new(today)),
            None => Arc::new(SystemClock),
        }
    }

    pub fn build_service(&self) -> HabitService {
        HabitService::builder()
            .with_clock(self.clock())
            .seed_demo_data(self.seed_demo_data)
            .build()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            seed_demo_data: true,
            pinned_today: None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! MySQL DSN assembly.

use std::fmt::Write as _;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3306;

/// Builder for `user:password@tcp(host:port)/db?key=value&..` strings.
///
/// Settings append in call order. String settings with an empty value and
/// timeouts outside `1ms..24h` are skipped rather than rejected.
#[derive(Clone, Debug)]
pub struct DsnBuilder {
    user: String,
    password: String,
    host: String,
    port: u16,
    db: String,
    params: Vec<(String, String)>,
}

impl DsnBuilder {
    pub fn new(
        db: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            host: host.into(),
            port: DEFAULT_PORT,
            db: db.into(),
            params: Vec::new(),
        }
    }

    /// Server port, default 3306.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Charset used for client-server interaction.
    pub fn charset(self, v: &str) -> Self {
        self.string_param("charset", v)
    }

    /// Collation used on connection. Unlike charset this issues no extra
    /// query, but an unavailable collation fails the connection.
    pub fn collation(self, v: &str) -> Self {
        self.string_param("collation", v)
    }

    /// Location for time values when parseTime is on.
    pub fn loc(self, v: &str) -> Self {
        self.string_param("loc", v)
    }

    /// Decode DATE/DATETIME columns into time values instead of byte strings.
    pub fn parse_time(self, ok: bool) -> Self {
        self.bool_param("parseTime", ok)
    }

    pub fn autocommit(self, ok: bool) -> Self {
        self.bool_param("autocommit", ok)
    }

    pub fn allow_native_passwords(self, ok: bool) -> Self {
        self.bool_param("allowNativePasswords", ok)
    }

    pub fn allow_cleartext_passwords(self, ok: bool) -> Self {
        self.bool_param("allowCleartextPasswords", ok)
    }

    /// Interpolate placeholders client-side, saving a prepare round trip.
    pub fn interpolate_params(self, ok: bool) -> Self {
        self.bool_param("interpolateParams", ok)
    }

    /// Make UPDATE report matched rows instead of changed rows.
    pub fn client_found_rows(self, ok: bool) -> Self {
        self.bool_param("clientFoundRows", ok)
    }

    /// Driver-side connection timeout.
    pub fn timeout(self, t: Duration) -> Self {
        self.time_param("timeout", t)
    }

    /// I/O read timeout.
    pub fn read_timeout(self, t: Duration) -> Self {
        self.time_param("readTimeout", t)
    }

    /// I/O write timeout.
    pub fn write_timeout(self, t: Duration) -> Self {
        self.time_param("writeTimeout", t)
    }

    /// Any other driver parameter, appended verbatim.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    fn string_param(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.params.push((key.to_owned(), value.to_owned()));
        }
        self
    }

    fn bool_param(mut self, key: &str, ok: bool) -> Self {
        self.params.push((key.to_owned(), ok.to_string()));
        self
    }

    fn time_param(mut self, key: &str, t: Duration) -> Self {
        // The driver accepts 1ms up to (not including) 24h.
        if t < Duration::from_millis(1) || t >= Duration::from_secs(24 * 3600) {
            return self;
        }
        let rendered = if t.subsec_nanos() == 0 {
            format!("{}s", t.as_secs())
        } else {
            format!("{}ms", t.as_millis())
        };
        self.params.push((key.to_owned(), rendered));
        self
    }

    /// Render the DSN, trimming the trailing `?` when no setting survived.
    pub fn build(self) -> String {
        let mut dsn = format!(
            "{}:{}@tcp({}:{})/{}?",
            self.user, self.password, self.host, self.port, self.db
        );
        for (key, value) in &self.params {
            let _ = write!(dsn, "{key}={value}&");
        }
        dsn.trim_end_matches('&').trim_end_matches('?').to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_dsn_has_no_query_string() {
        let dsn = DsnBuilder::new("db", "root", "secret", "localhost").build();
        assert_eq!(dsn, "root:secret@tcp(localhost:3306)/db");
    }

    #[test]
    fn settings_append_in_call_order() {
        let dsn = DsnBuilder::new("shop", "app", "pw", "10.0.0.5")
            .port(3307)
            .charset("utf8mb4")
            .parse_time(true)
            .allow_native_passwords(false)
            .build();
        assert_eq!(
            dsn,
            "app:pw@tcp(10.0.0.5:3307)/shop?charset=utf8mb4&parseTime=true&allowNativePasswords=false"
        );
    }

    #[test]
    fn out_of_range_timeouts_are_skipped() {
        let dsn = DsnBuilder::new("db", "u", "p", "h")
            .timeout(Duration::from_micros(500))
            .read_timeout(Duration::from_secs(24 * 3600))
            .write_timeout(Duration::from_secs(30))
            .build();
        assert_eq!(dsn, "u:p@tcp(h:3306)/db?writeTimeout=30s");
    }

    #[test]
    fn sub_second_timeouts_render_in_millis() {
        let dsn = DsnBuilder::new("db", "u", "p", "h")
            .timeout(Duration::from_millis(1500))
            .build();
        assert_eq!(dsn, "u:p@tcp(h:3306)/db?timeout=1500ms");
    }

    #[test]
    fn empty_string_settings_are_skipped() {
        let dsn = DsnBuilder::new("db", "u", "p", "h").charset("").loc("Local").build();
        assert_eq!(dsn, "u:p@tcp(h:3306)/db?loc=Local");
    }
}

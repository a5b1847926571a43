use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::access::{ScopeDimension, ScopeFilter};
use crate::types::IssueStatus;

use super::manager::DatabaseError;
use super::models::{
    AuditLog, City, CityAnalytics, Contractor, Issue, IssueExportRow, IssueFacet, JurisdictionRef, MapPoint,
    StateAnalytics, UserProfile, Ward, WardAnalytics, Zone, ZoneAnalytics, ISSUE_COLUMNS,
};

/// Read-only queries over issues, jurisdictions and the analytics views
#[derive(Clone)]
pub struct Repository {
    pool: PgPool,
}

/// Optional narrowing applied on top of a scope filter
#[derive(Debug, Clone, Default)]
pub struct IssueQuery {
    pub status: Option<IssueStatus>,
    pub limit: Option<i64>,
    /// Case-insensitive substring over id, description and category
    pub search: Option<String>,
}

impl IssueQuery {
    /// Attach a search term; blank input leaves the query unfiltered
    pub fn with_search(mut self, raw: Option<&str>) -> Self {
        self.search = raw.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        self
    }
}

impl Repository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // -- callers and jurisdictions -------------------------------------------------

    pub async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, DatabaseError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, full_name, email, role::text AS role, city_id, ward_id, zone_id
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    /// City owning a ward or zone; `None` for other dimensions or unknown ids
    pub async fn parent_city(&self, dimension: ScopeDimension, id: Uuid) -> Result<Option<Uuid>, DatabaseError> {
        let sql = match dimension {
            ScopeDimension::Ward => "SELECT city_id FROM wards WHERE id = $1",
            ScopeDimension::Zone => "SELECT city_id FROM zones WHERE id = $1",
            ScopeDimension::State | ScopeDimension::City => return Ok(None),
        };
        let row = sqlx::query(sql).bind(id).fetch_optional(&self.pool).await?;
        match row {
            Some(r) => Ok(r.try_get::<Option<Uuid>, _>("city_id")?),
            None => Ok(None),
        }
    }

    pub async fn city(&self, id: Uuid) -> Result<Option<City>, DatabaseError> {
        let city = sqlx::query_as::<_, City>(
            "SELECT id, name, state, population::int8 AS population, created_at FROM cities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(city)
    }

    pub async fn ward(&self, id: Uuid) -> Result<Option<Ward>, DatabaseError> {
        let ward = sqlx::query_as::<_, Ward>(
            r#"
            SELECT w.id, w.name, w.city_id, c.name AS city_name, w.population::int8 AS population
            FROM wards w
            LEFT JOIN cities c ON c.id = w.city_id
            WHERE w.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ward)
    }

    pub async fn zone(&self, id: Uuid) -> Result<Option<Zone>, DatabaseError> {
        let zone = sqlx::query_as::<_, Zone>(
            r#"
            SELECT z.id, z.name, z.city_id, c.name AS city_name, z.ward_ids,
                   z.supervisor_user_id, u.full_name AS supervisor_name
            FROM zones z
            LEFT JOIN cities c ON c.id = z.city_id
            LEFT JOIN users u ON u.id = z.supervisor_user_id
            WHERE z.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(zone)
    }

    pub async fn wards_in_city(&self, city_id: Uuid) -> Result<Vec<JurisdictionRef>, DatabaseError> {
        let wards = sqlx::query_as::<_, JurisdictionRef>("SELECT id, name FROM wards WHERE city_id = $1 ORDER BY name")
            .bind(city_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(wards)
    }

    pub async fn zones_in_city(&self, city_id: Uuid) -> Result<Vec<JurisdictionRef>, DatabaseError> {
        let zones = sqlx::query_as::<_, JurisdictionRef>("SELECT id, name FROM zones WHERE city_id = $1 ORDER BY name")
            .bind(city_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(zones)
    }

    pub async fn wards_by_ids(&self, ids: &[Uuid]) -> Result<Vec<JurisdictionRef>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let wards = sqlx::query_as::<_, JurisdictionRef>("SELECT id, name FROM wards WHERE id = ANY($1) ORDER BY name")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(wards)
    }

    // -- issues --------------------------------------------------------------------

    pub async fn issues(&self, filter: &ScopeFilter, query: IssueQuery) -> Result<Vec<Issue>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        qb.push(ISSUE_COLUMNS).push(" FROM issues i");
        push_scope(&mut qb, filter);
        if let Some(status) = query.status {
            qb.push(" AND i.status::text = ").push_bind(status.as_str());
        }
        if let Some(term) = query.search.as_deref() {
            push_search(&mut qb, term);
        }
        qb.push(" ORDER BY i.created_at DESC");
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let issues = qb.build_query_as::<Issue>().fetch_all(&self.pool).await?;
        Ok(issues)
    }

    pub async fn issue(&self, id: Uuid) -> Result<Option<Issue>, DatabaseError> {
        let sql = format!("SELECT {} FROM issues i WHERE i.id = $1", ISSUE_COLUMNS);
        let issue = sqlx::query_as::<_, Issue>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(issue)
    }

    pub async fn map_points(&self, filter: &ScopeFilter) -> Result<Vec<MapPoint>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"SELECT i.id, i.latitude::float8 AS latitude, i.longitude::float8 AS longitude, i.category,
                      i.status::text AS status, i.priority::text AS priority
               FROM issues i"#,
        );
        push_scope(&mut qb, filter);
        qb.push(" AND i.latitude IS NOT NULL AND i.longitude IS NOT NULL");

        let points = qb.build_query_as::<MapPoint>().fetch_all(&self.pool).await?;
        Ok(points)
    }

    pub async fn facets(&self, filter: &ScopeFilter) -> Result<Vec<IssueFacet>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT i.category, i.status::text AS status FROM issues i");
        push_scope(&mut qb, filter);

        let facets = qb.build_query_as::<IssueFacet>().fetch_all(&self.pool).await?;
        Ok(facets)
    }

    pub async fn export_rows(
        &self,
        filter: &ScopeFilter,
        limit: Option<i64>,
    ) -> Result<Vec<IssueExportRow>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"SELECT i.id, i.category, i.description, i.status::text AS status, i.priority::text AS priority,
                      i.address, c.name AS city_name, z.name AS zone_name, w.name AS ward_name,
                      i.created_at, i.latitude::float8 AS latitude, i.longitude::float8 AS longitude
               FROM issues i
               LEFT JOIN cities c ON c.id = i.city_id
               LEFT JOIN zones z ON z.id = i.zone_id
               LEFT JOIN wards w ON w.id = i.ward_id"#,
        );
        push_scope(&mut qb, filter);
        qb.push(" ORDER BY i.created_at DESC");
        if let Some(limit) = limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let rows = qb.build_query_as::<IssueExportRow>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn audit_logs(&self, issue_id: Uuid) -> Result<Vec<AuditLog>, DatabaseError> {
        let logs = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT a.id, a.issue_id, a.action, a.performed_by, u.full_name AS performer_name,
                   a.old_data, a.new_data, a.created_at
            FROM audit_logs a
            LEFT JOIN users u ON u.id = a.performed_by
            WHERE a.issue_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(issue_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    // -- analytics views -----------------------------------------------------------

    pub async fn state_analytics(&self) -> Result<Option<StateAnalytics>, DatabaseError> {
        let row = sqlx::query_as::<_, StateAnalytics>(
            r#"
            SELECT total_issues::int8, open_issues::int8, resolved_issues::int8, rejected_issues::int8,
                   unverified_issues::int8, in_progress_issues::int8,
                   sla_compliance_rate::float8, sla_breached::int8,
                   total_reporters::int8, active_workers::int8,
                   avg_resolution_time_hours::float8, refreshed_at
            FROM analytics_state_overview
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// One city's analytics row, or every city's when `city_id` is `None`
    pub async fn city_analytics(&self, city_id: Option<Uuid>) -> Result<Vec<CityAnalytics>, DatabaseError> {
        let mut qb = city_analytics_query(city_id);
        let rows = qb.build_query_as::<CityAnalytics>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn ward_analytics(&self, ward_id: Uuid) -> Result<Option<WardAnalytics>, DatabaseError> {
        let row = sqlx::query_as::<_, WardAnalytics>(
            r#"
            SELECT ward_id, ward_name, city_id, city_name, total_issues::int8, open_issues::int8,
                   resolved_issues::int8, in_progress_issues::int8, assigned_issues::int8,
                   avg_resolution_time_hours::float8, active_workers::int8, refreshed_at
            FROM analytics_by_ward
            WHERE ward_id = $1
            "#,
        )
        .bind(ward_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn zone_analytics(&self, zone_id: Uuid) -> Result<Option<ZoneAnalytics>, DatabaseError> {
        let row = sqlx::query_as::<_, ZoneAnalytics>(
            r#"
            SELECT zone_id, zone_name, city_id, city_name, supervisor_user_id, supervisor_name,
                   total_issues::int8, unverified_issues::int8, verified_issues::int8,
                   forwarded_issues::int8, rejected_issues::int8, resolved_issues::int8,
                   avg_verification_time_hours::float8, refreshed_at
            FROM analytics_by_zone
            WHERE zone_id = $1
            "#,
        )
        .bind(zone_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    // -- contractors ---------------------------------------------------------------

    /// Workers with their contractor profile, optionally limited to one city
    pub async fn contractors(&self, city_id: Option<Uuid>) -> Result<Vec<Contractor>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"SELECT u.id, u.full_name, u.email, u.phone, u.city_id, c.name AS city_name,
                      p.specializations, p.rating::float8 AS rating,
                      p.active_assignments::int4 AS active_assignments,
                      p.completed_assignments::int4 AS completed_assignments
               FROM users u
               LEFT JOIN cities c ON c.id = u.city_id
               LEFT JOIN contractor_profiles p ON p.user_id = u.id
               WHERE u.role::text = 'worker'"#,
        );
        if let Some(city_id) = city_id {
            qb.push(" AND u.city_id = ").push_bind(city_id);
        }
        qb.push(" ORDER BY u.full_name");

        let rows = qb.build_query_as::<Contractor>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Rows of `analytics_contractor_performance` passed through as JSON objects
    pub async fn contractor_performance(&self) -> Result<Vec<Value>, DatabaseError> {
        let rows = sqlx::query(
            r#"
            SELECT row_to_json(t) AS row
            FROM (SELECT * FROM analytics_contractor_performance ORDER BY completed_count DESC) t
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let values = rows
            .iter()
            .map(|row| row.try_get::<Value, _>("row"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }
}

/// Busiest cities first
fn city_analytics_query(city_id: Option<Uuid>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(
        r#"SELECT city_id, city_name, total_issues::int8, open_issues::int8, resolved_issues::int8,
                  unverified_issues::int8, in_progress_issues::int8, sla_compliance_rate::float8,
                  critical_issues::int8, high_priority_issues::int8,
                  avg_resolution_time_hours::float8, refreshed_at
           FROM analytics_by_city"#,
    );
    if let Some(city_id) = city_id {
        qb.push(" WHERE city_id = ").push_bind(city_id);
    }
    qb.push(" ORDER BY total_issues DESC, city_name");
    qb
}

/// Append the scope predicate as a WHERE clause over the `i` alias.
/// Always emits WHERE so callers can chain further `AND` conditions.
fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, filter: &ScopeFilter) {
    qb.push(" WHERE TRUE");
    if let Some((column, id)) = filter.predicate() {
        qb.push(" AND i.").push(column).push(" = ").push_bind(id);
    }
}

/// Append an ILIKE match on id, description or category
fn push_search(qb: &mut QueryBuilder<'_, Postgres>, term: &str) {
    let pattern = format!("%{}%", escape_like(term));
    qb.push(" AND (i.id::text ILIKE ")
        .push_bind(pattern.clone())
        .push(" OR i.description ILIKE ")
        .push_bind(pattern.clone())
        .push(" OR i.category ILIKE ")
        .push_bind(pattern)
        .push(")");
}

/// Escape LIKE wildcards so user input matches literally (backslash is the default escape)
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

//! API endpoint URL builders

/// Build jobs collection URL
pub fn jobs_url(base_url: &str) -> String {
    format!("{}/api/v1/jobs", base_url.trim_end_matches('/'))
}

/// Build job submission URL
pub fn submit_url(base_url: &str, wait: bool) -> String {
    if wait {
        format!("{}?wait=true", jobs_url(base_url))
    } else {
        jobs_url(base_url)
    }
}

/// Build job listing URL with an optional status filter
pub fn list_url(base_url: &str, status: Option<&str>) -> String {
    match status {
        Some(status) => format!("{}?status={}", jobs_url(base_url), urlencoding::encode(status)),
        None => jobs_url(base_url),
    }
}

/// Build job details URL
pub fn job_url(base_url: &str, job_id: &str) -> String {
    format!("{}/{}", jobs_url(base_url), urlencoding::encode(job_id))
}

/// Build job status URL
pub fn job_status_url(base_url: &str, job_id: &str) -> String {
    format!("{}/status", job_url(base_url, job_id))
}

/// Build health check URL
pub fn health_url(base_url: &str) -> String {
    format!("{}/health", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_url() {
        assert_eq!(submit_url("http://localhost:8000", false), "http://localhost:8000/api/v1/jobs");
        assert_eq!(
            submit_url("http://localhost:8000/", true),
            "http://localhost:8000/api/v1/jobs?wait=true"
        );
    }

    #[test]
    fn test_job_status_url_encodes_id() {
        assert_eq!(
            job_status_url("http://localhost:8000", "batch 7/a"),
            "http://localhost:8000/api/v1/jobs/batch%207%2Fa/status"
        );
    }

    #[test]
    fn test_list_url() {
        assert_eq!(list_url("http://etl", None), "http://etl/api/v1/jobs");
        assert_eq!(list_url("http://etl", Some("failed")), "http://etl/api/v1/jobs?status=failed");
    }

    #[test]
    fn test_health_url() {
        assert_eq!(health_url("http://localhost:8000"), "http://localhost:8000/health");
    }
}

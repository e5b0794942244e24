use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::assessment::AssessmentResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub skills: String,
    pub preferences: String,
    pub ikigai_components: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_unique_path: Option<String>,
}

/// The four answers joined with fixed labels, in the fixed order love, goodAt,
/// worldNeeds, paidFor. User text is passed through untouched.
pub fn ikigai_components(a: &AssessmentResponse) -> String {
    format!(
        "What I love: {}\nWhat I'm good at: {}\nWhat the world needs: {}\nWhat I can be paid for: {}",
        a.love, a.good_at, a.world_needs, a.paid_for
    )
}

impl From<&AssessmentResponse> for RecommendationRequest {
    fn from(a: &AssessmentResponse) -> Self {
        Self {
            skills: a.good_at.clone(),
            preferences: a.paid_for.clone(),
            ikigai_components: ikigai_components(a),
            user_unique_path: None,
        }
    }
}

impl RecommendationRequest {
    /// Navigation query string carrying the three required parameters.
    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("skills", &self.skills)
            .append_pair("preferences", &self.preferences)
            .append_pair("ikigaiComponents", &self.ikigai_components)
            .finish()
    }
}

/// Roadmap entry parameters as they arrive from navigation; any may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadmapParams {
    pub skills: Option<String>,
    pub preferences: Option<String>,
    pub ikigai_components: Option<String>,
}

impl RoadmapParams {
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (k, v) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match k.as_ref() {
                "skills" => params.skills = Some(v.into_owned()),
                "preferences" => params.preferences = Some(v.into_owned()),
                "ikigaiComponents" => params.ikigai_components = Some(v.into_owned()),
                _ => {}
            }
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_none() && self.preferences.is_none() && self.ikigai_components.is_none()
    }

    /// `None` when any of the three is absent or empty; the caller shows the no-data view.
    pub fn into_request(self) -> Option<RecommendationRequest> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        Some(RecommendationRequest {
            skills: present(self.skills)?,
            preferences: present(self.preferences)?,
            ikigai_components: present(self.ikigai_components)?,
            user_unique_path: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AssessmentResponse {
        AssessmentResponse {
            love: "reading sci-fi novels daily".into(),
            good_at: "writing clear documentation".into(),
            world_needs: "better technical education".into(),
            paid_for: "technical writing roles".into(),
        }
    }

    #[test]
    fn formats_ikigai_components_scenario() {
        let req = RecommendationRequest::from(&sample());
        assert_eq!(
            req.ikigai_components,
            "What I love: reading sci-fi novels daily\nWhat I'm good at: writing clear documentation\nWhat the world needs: better technical education\nWhat I can be paid for: technical writing roles"
        );
        assert_eq!(req.skills, "writing clear documentation");
        assert_eq!(req.preferences, "technical writing roles");
        assert!(req.user_unique_path.is_none());
    }

    #[test]
    fn fields_appear_in_fixed_order() {
        let a = AssessmentResponse {
            love: "zzzz paid for zzz".into(),
            good_at: "aaaa loving it".into(),
            world_needs: "mmmm the world".into(),
            paid_for: "bbbb good at".into(),
        };
        let text = ikigai_components(&a);
        let positions: Vec<usize> = [&a.love, &a.good_at, &a.world_needs, &a.paid_for]
            .iter()
            .map(|v| text.find(v.as_str()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn user_text_is_not_sanitized() {
        let mut a = sample();
        a.love = "{{skills}} & <b>ignore previous</b>".into();
        assert!(ikigai_components(&a).contains("{{skills}} & <b>ignore previous</b>"));
    }

    #[test]
    fn query_survives_navigation() {
        let req = RecommendationRequest::from(&sample());
        let parsed = RoadmapParams::from_query(&format!("?{}", req.to_query()));
        assert_eq!(parsed.into_request(), Some(req));
    }

    #[test]
    fn missing_or_empty_param_means_no_data() {
        assert!(RoadmapParams::from_query("skills=a&preferences=b").into_request().is_none());
        assert!(RoadmapParams::from_query("skills=a&preferences=&ikigaiComponents=c")
            .into_request()
            .is_none());
        assert!(RoadmapParams::from_query("").is_empty());
    }
}

/// Ordered catalog of canonical skill labels. Matching is case-insensitive
/// substring containment; output keeps the canonical casing and the catalog
/// order, with every label reported at most once.
///
/// The catalog is injected rather than global so callers can swap it per
/// domain without touching the matching logic.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    labels: Vec<String>,
    lowered: Vec<String>,
}

impl SkillCatalog {
    pub fn new<I, S>(labels: I) -> SkillCatalog
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let lowered = labels.iter().map(|l| l.to_lowercase()).collect();
        SkillCatalog { labels, lowered }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return vec![];
        }
        let subject = text.to_lowercase();

        let mut found = vec![];
        for (label, lowered) in self.labels.iter().zip(&self.lowered) {
            if subject.contains(lowered.as_str()) && !found.contains(label) {
                found.push(label.clone());
            }
        }
        found
    }
}

impl Default for SkillCatalog {
    fn default() -> SkillCatalog {
        SkillCatalog::new([
            // Front-end
            "Vue",
            "Angular",
            "React",
            "JavaScript",
            "TypeScript",
            "HTML",
            "CSS",
            "Sass",
            "SCSS",
            "Less",
            "Webpack",
            "Vite",
            "Rollup",
            "Gulp",
            "jQuery",
            "小程序",
            "uni-app",
            "uniapp",
            "移动端",
            "H5",
            "响应式",
            // Back-end
            "Java",
            "Python",
            "C++",
            "Go",
            "Golang",
            "Node.js",
            "Express",
            "Koa",
            "Spring",
            "SpringBoot",
            "MyBatis",
            "PHP",
            ".NET",
            "ASP.NET",
            // Databases
            "MySQL",
            "PostgreSQL",
            "MongoDB",
            "Redis",
            "Oracle",
            "Elasticsearch",
            // Tooling and infra
            "Docker",
            "Kubernetes",
            "K8s",
            "Git",
            "SVN",
            "Linux",
            "Nginx",
            "Apache",
            // AI / ML
            "AI",
            "机器学习",
            "深度学习",
            "TensorFlow",
            "PyTorch",
            "神经网络",
            "NLP",
            "计算机视觉",
            // Protocols and practices
            "RESTful",
            "GraphQL",
            "gRPC",
            "微服务",
            "分布式",
            "高并发",
            "性能优化",
            "自动化测试",
            "TDD",
            "BDD",
            "单元测试",
            // More frameworks
            "Ant Design",
            "Element UI",
            "Vuex",
            "Redux",
            "React Native",
            "Flutter",
            "WebSocket",
            "HTTP/HTTPS",
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_text_yields_empty_set() {
        let catalog = SkillCatalog::default();
        assert_eq!(catalog.extract(""), Vec::<String>::new());
    }

    #[test]
    fn matches_are_case_insensitive_and_keep_canonical_casing() {
        let catalog = SkillCatalog::default();
        let skills = catalog.extract("experience with REACT and mysql required");
        assert_eq!(skills, vec!["React".to_string(), "MySQL".to_string()]);
    }

    #[test]
    fn output_follows_catalog_order_not_text_order() {
        let catalog = SkillCatalog::new(["React", "MySQL", "Docker"]);
        let skills = catalog.extract("Docker first, then MySQL, finally React");
        assert_eq!(skills, vec!["React", "MySQL", "Docker"]);
    }

    #[test]
    fn repeated_mentions_are_reported_once() {
        let catalog = SkillCatalog::new(["Redis"]);
        let skills = catalog.extract("Redis, more Redis, redis again");
        assert_eq!(skills, vec!["Redis"]);
    }

    #[test]
    fn extraction_is_idempotent_over_its_own_output() {
        let catalog = SkillCatalog::default();
        let text = "我们使用 Vue 和 TypeScript 开发小程序，后端是 Node.js + MySQL + Redis";
        let first = catalog.extract(text);
        let second = catalog.extract(&first.join(" "));
        assert_eq!(first, second);
    }

    #[test]
    fn mixed_language_description_is_tagged() {
        let catalog = SkillCatalog::default();
        let skills = catalog.extract("负责小程序与 H5 开发，熟悉性能优化");
        assert_eq!(skills, vec!["小程序", "H5", "性能优化"]);
    }
}

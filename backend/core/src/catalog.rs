//! Built-in rule catalogue for the support-assistant workshop.
//!
//! Order is priority: narrow topics first, broad catch-alls (security,
//! search) after the rules they would otherwise starve.

use crate::error::MockError;
use crate::response::ResponsePattern;

pub const DEFAULT_RESPONSE: &str = "\
I'm the Support Assistant, here to help with your Tanzu Spring questions.

I can assist with:
- Tanzu Spring features and support options
- Spring Boot and Spring Cloud technical questions
- CVE patches and security updates
- Support ticket management
- Billing and subscription inquiries

Please let me know how I can help you today!";

const TANZU_SPRING: &str = "\
Tanzu Spring is Broadcom's commercial offering that provides enterprise-grade support \
for Spring applications. It includes:

- **24/7 Production Support**: Round-the-clock assistance from Spring experts
- **CVE Patches**: Priority access to security patches, often before public release
- **Long-term Support (LTS)**: Extended support for Spring Boot versions beyond community EOL
- **Spring Health Assessment**: Expert analysis of your Spring applications
- **Tanzu Spring Runtime**: Curated, tested Spring dependencies

With Tanzu Spring, organizations get peace of mind knowing their Spring applications \
are backed by the creators of the Spring Framework.";

const SUPPORT_OFFERINGS: &str = "\
Tanzu Spring support includes:

1. **Technical Support**: 24/7 access to Spring experts via support portal
2. **CVE Response**: Priority notification and patches for security vulnerabilities
3. **Upgrade Guidance**: Expert assistance with Spring Boot upgrades
4. **Performance Tuning**: Help optimizing your Spring applications
5. **Architecture Review**: Best practices consultation

Support tickets are categorized by severity:
- **Critical (P1)**: Production down, immediate response
- **High (P2)**: Major functionality impacted, 4-hour response
- **Medium (P3)**: Non-critical issues, 8-hour response
- **Low (P4)**: General questions, 24-hour response";

const BILLING: &str = "\
I understand you have a billing-related question. Here's what I can help with:

- **Subscription Status**: Check your current Tanzu Spring subscription
- **Invoice History**: View past invoices in the customer portal
- **Payment Methods**: Update payment information securely
- **Plan Upgrades**: Learn about additional support tiers

For specific billing inquiries, I recommend creating a support ticket with category \
'BILLING' so our finance team can assist you directly.";

const SECURITY: &str = "\
Tanzu Spring provides comprehensive CVE (Common Vulnerabilities and Exposures) coverage:

**What's Included:**
- Priority notification of security vulnerabilities affecting Spring
- Patches often available before public disclosure
- Backported security fixes for LTS versions
- Security advisories with remediation guidance

**Recent CVE Examples:**
- CVE-2024-38816: Spring Framework path traversal - Patched in 5.3.39, 6.0.23, 6.1.12
- CVE-2024-38809: Spring Framework DoS vulnerability - Patched in 6.1.12

Enterprise customers receive these patches through the Tanzu Spring Runtime distribution.";

const SPRING_BOOT_VERSIONS: &str = "\
Here are the current Spring Boot versions:

**Latest Releases:**
- Spring Boot 3.4.1 (Current GA) - Released January 2025
- Spring Boot 3.3.7 (Maintenance) - LTS through Tanzu Spring
- Spring Boot 3.2.12 (Maintenance)

**Tanzu Spring Runtime Versions:**
Enterprise customers have access to curated, tested distributions with extended support.

**Upgrade Recommendation:**
If you're on Spring Boot 2.x, we strongly recommend planning your upgrade to 3.x. \
Tanzu Spring includes upgrade assistance and compatibility testing.";

const SPRING_CLOUD: &str = "\
Spring Cloud provides tools for building distributed systems and microservices:

**Key Components:**
- **Spring Cloud Config**: Centralized configuration management
- **Spring Cloud Netflix**: Service discovery, circuit breakers (Eureka, Hystrix legacy)
- **Spring Cloud Gateway**: API gateway with routing and filtering
- **Spring Cloud Sleuth/Micrometer**: Distributed tracing
- **Spring Cloud Stream**: Event-driven microservices with Kafka/RabbitMQ

**Tanzu Spring Coverage:**
All Spring Cloud components are covered under enterprise support, including \
assistance with architecture decisions and troubleshooting distributed systems issues.";

const GREETING: &str = "\
Hello! I'm the Support Assistant, an AI-powered helper for Broadcom Tanzu Spring customers.

I can help you with:
- Questions about Tanzu Spring features and support
- Technical guidance on Spring Boot and Spring Cloud
- Information about CVE patches and security updates
- Support ticket creation and management
- Subscription and billing inquiries

How can I assist you today?";

/// Compile the built-in rules in priority order.
pub fn builtin_rules() -> Result<Vec<ResponsePattern>, MockError> {
    Ok(vec![
        ResponsePattern::text(
            r".*(what is|about|tell me).*tanzu.*spring.*(enterprise|runtime).*",
            TANZU_SPRING,
        )?,
        ResponsePattern::text(
            r".*(support|help|assistance).*tanzu.*spring.*",
            SUPPORT_OFFERINGS,
        )?,
        ResponsePattern::text(
            r".*(billing|invoice|payment|cost|price|subscription).*",
            BILLING,
        )?,
        ResponsePattern::text(r".*(cve|security|vulnerabilit|patch).*", SECURITY)?,
        ResponsePattern::text(
            r".*(latest|current|version|release).*spring.*boot.*",
            SPRING_BOOT_VERSIONS,
        )?,
        ResponsePattern::text(r".*spring.*cloud.*", SPRING_CLOUD)?,
        ResponsePattern::text(
            r"^(hi|hello|hey|greetings).*|.*(who are you|introduce yourself).*",
            GREETING,
        )?,
        ResponsePattern::tool(r".*(weather|temperature|forecast).*", "get_weather")?,
        ResponsePattern::tool(
            r".*(what time|current time|what's the time|time is it).*",
            "get_current_time",
        )?,
        ResponsePattern::tool(
            r".*(create|open|submit|file).*(ticket|case|issue).*",
            "create_ticket",
        )?,
        ResponsePattern::tool(
            r".*(search|look up|find|latest news|recent).*",
            "web_search",
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Response;

    #[test]
    fn builtin_rules_compile() {
        let rules = builtin_rules().unwrap();
        assert_eq!(rules.len(), 11);
        let tools: Vec<_> = rules.iter().filter_map(|r| r.response().tool_name()).collect();
        assert_eq!(
            tools,
            vec!["get_weather", "get_current_time", "create_ticket", "web_search"]
        );
    }

    #[test]
    fn continuation_lines_are_joined() {
        let rules = builtin_rules().unwrap();
        let Response::PlainText(text) = rules[0].response() else {
            panic!("first rule should be plain text");
        };
        assert!(text.contains("enterprise-grade support for Spring applications"));
        assert!(text.ends_with("creators of the Spring Framework."));
    }
}

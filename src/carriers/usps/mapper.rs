//! USPS request builder and response normalizer

use crate::carriers::traits::{CarrierCredentials, CarrierError, RateMode};
use crate::domain::{Estimate, Provider};

use super::codes::{Container, MailService, UspsCodeTable};
use super::models::*;
use super::validate::{SizeClass, UspsPackage, UspsShipment};

const REVISION: &str = "2";

/// Mapper between unified models and USPS wire models
pub struct UspsMapper;

impl UspsMapper {
    /// Build a RateV4 request, one `Package` per validated package
    pub fn rate_request(
        validated: &UspsShipment,
        credentials: &CarrierCredentials,
        mode: RateMode,
    ) -> RateV4Request {
        RateV4Request {
            user_id: credentials.user_id.clone().unwrap_or_default(),
            revision: REVISION.to_string(),
            packages: validated
                .packages
                .iter()
                .enumerate()
                .map(|(index, package)| Self::package(index, package, validated, mode))
                .collect(),
        }
    }

    fn package(
        index: usize,
        package: &UspsPackage,
        validated: &UspsShipment,
        mode: RateMode,
    ) -> RatePackage {
        // Shop keeps ONLINE pricing when it was asked for
        let service = match mode {
            RateMode::Shop if !package.service.is_multi() => MailService::All,
            _ => package.service,
        };
        let first_class_mail_type = if service.is_first_class() {
            package.first_class_type.map(|t| t.code().to_string())
        } else {
            None
        };

        let (pounds, ounces) = package.pounds_ounces();
        let dims = match package.size {
            SizeClass::Large => package.dimensions,
            SizeClass::Regular => None,
        };
        let girth = match (dims, package.container) {
            (Some(d), Some(Container::Nonrectangular)) => {
                let [_, second, third] = d.sorted_desc();
                Some(2.0 * (second + third))
            }
            _ => None,
        };

        RatePackage {
            id: index.to_string(),
            service: service.code().to_string(),
            first_class_mail_type,
            zip_origination: validated.zip_origination.clone(),
            zip_destination: validated.zip_destination.clone(),
            pounds: pounds.to_string(),
            ounces: number(ounces),
            container: package.container.map(|c| c.code().to_string()),
            size: package.size.code().to_string(),
            width: dims.map(|d| number(d.width)),
            length: dims.map(|d| number(d.length)),
            height: dims.map(|d| number(d.height)),
            girth: girth.map(number),
            machinable: Some(package.machinable.to_string()),
        }
    }

    /// Turn an `<Error>` document into a carrier rejection
    pub fn rejected(error: UspsError) -> CarrierError {
        CarrierError::Rejected {
            code: error.number.trim().to_string(),
            message: error.description.trim().to_string(),
        }
    }

    /// Map every postage entry of every package to an estimate
    ///
    /// A package-level error fails the whole response.
    pub fn estimates(
        response: RateV4Response,
        codes: &UspsCodeTable,
    ) -> Result<Vec<Estimate>, CarrierError> {
        let mut estimates = Vec::new();

        for package in response.packages {
            if let Some(error) = package.error {
                return Err(Self::rejected(error));
            }

            for postage in package.postage {
                let class_id = postage.class_id.trim().to_string();
                let price: f64 = postage.rate.trim().parse().map_err(|_| {
                    CarrierError::Parse(format!(
                        "invalid rate {:?} for mail class {}",
                        postage.rate, class_id
                    ))
                })?;
                if !(price >= 0.0) {
                    return Err(CarrierError::Parse(format!(
                        "negative or invalid rate {} for mail class {}",
                        price, class_id
                    )));
                }

                let name = match codes.class_name(&class_id) {
                    "" => strip_markup(&postage.mail_service),
                    known => known.to_string(),
                };
                estimates.push(Estimate::new(name, Provider::Usps, class_id, price));
            }
        }

        Ok(estimates)
    }
}

fn number(value: f64) -> String {
    format!("{}", (value * 10.0).round() / 10.0)
}

/// Drop HTML tags and entities USPS embeds in service names
///
/// USPS escapes the markup a second time, so `&lt;sup&gt;` is unwrapped
/// before tags are removed.
fn strip_markup(text: &str) -> String {
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    let mut out = String::with_capacity(text.len());
    let mut skip_until = None;

    for ch in text.chars() {
        match (skip_until, ch) {
            (Some(end), c) if c == end => skip_until = None,
            (Some(_), _) => {}
            (None, '<') => skip_until = Some('>'),
            (None, '&') => skip_until = Some(';'),
            (None, c) => out.push(c),
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carriers::usps::validate::validate_shipment;
    use crate::carriers::xml;
    use crate::domain::{Address, Dimensions, Package, Shipment, Weight};

    fn zip(code: &str) -> Address {
        Address {
            postal_code: code.to_string(),
            country: "US".to_string(),
            ..Default::default()
        }
    }

    fn credentials() -> CarrierCredentials {
        CarrierCredentials {
            user_id: Some("USPSUSER".to_string()),
            ..Default::default()
        }
    }

    fn render(packages: Vec<Package>, mode: RateMode) -> String {
        let shipment = Shipment::new(zip("20770"), zip("90210"), packages);
        let validated = validate_shipment(&shipment).unwrap();
        let request = UspsMapper::rate_request(&validated, &credentials(), mode);
        xml::render("RateV4Request", &request).unwrap()
    }

    #[test]
    fn test_regular_package_omits_dimensions() {
        let body = render(
            vec![Package::new(Weight::ounces(20.0))
                .with_dimensions(Dimensions::new(6.0, 4.0, 10.0))],
            RateMode::Rate,
        );

        assert!(body.contains("USERID=\"USPSUSER\""));
        assert!(body.contains("<Service>PARCEL</Service>"));
        assert!(body.contains("<Pounds>1</Pounds>"));
        assert!(body.contains("<Ounces>4</Ounces>"));
        assert!(body.contains("<Size>REGULAR</Size>"));
        assert!(!body.contains("<Width>"));
        assert!(!body.contains("<Container>"));
        assert!(!body.contains("FirstClassMailType"));
    }

    #[test]
    fn test_light_packages_never_render_as_zero_weight() {
        for ounces in [0.1, 0.14, 0.95, 15.96, 16.0, 16.04, 31.99] {
            let body = render(vec![Package::new(Weight::ounces(ounces))], RateMode::Rate);
            assert!(
                !body.contains("<Pounds>0</Pounds><Ounces>0</Ounces>"),
                "{} oz rendered as zero: {}",
                ounces,
                body
            );
        }

        let body = render(vec![Package::new(Weight::ounces(0.1))], RateMode::Rate);
        assert!(body.contains("<Pounds>0</Pounds><Ounces>0.1</Ounces>"));
    }

    #[test]
    fn test_large_package_sends_dimensions_and_container() {
        let body = render(
            vec![Package::new(Weight::ounces(20.0))
                .with_dimensions(Dimensions::new(10.0, 4.0, 15.0))],
            RateMode::Rate,
        );

        assert!(body.contains("<Container>RECTANGULAR</Container>"));
        assert!(body.contains("<Size>LARGE</Size>"));
        assert!(body.contains("<Width>10</Width>"));
        assert!(body.contains("<Length>15</Length>"));
        assert!(!body.contains("<Girth>"));
    }

    #[test]
    fn test_shop_mode_requests_all_services() {
        let body = render(
            vec![Package::new(Weight::ounces(8.0)).with_service("FIRST CLASS")],
            RateMode::Shop,
        );
        assert!(body.contains("<Service>ALL</Service>"));
        assert!(!body.contains("FirstClassMailType"));

        let body = render(
            vec![Package::new(Weight::ounces(8.0)).with_service("FIRST CLASS")],
            RateMode::Rate,
        );
        assert!(body.contains("<Service>FIRST CLASS</Service>"));
        assert!(body.contains("<FirstClassMailType>PARCEL</FirstClassMailType>"));
    }

    #[test]
    fn test_multi_class_services_pass_through() {
        let body = render(
            vec![Package::new(Weight::ounces(8.0)).with_service("ONLINE")],
            RateMode::Shop,
        );
        assert!(body.contains("<Service>ONLINE</Service>"));

        let body = render(
            vec![Package::new(Weight::ounces(8.0)).with_service("ALL")],
            RateMode::Rate,
        );
        assert!(body.contains("<Service>ALL</Service>"));
        assert!(!body.contains("FirstClassMailType"));
    }

    #[test]
    fn test_estimates_use_class_names_then_mail_service_text() {
        let raw = r#"<RateV4Response><Package ID="0"><ZipOrigination>20770</ZipOrigination><Postage CLASSID="1"><MailService>Priority Mail 2-Day&lt;sup&gt;&amp;#8482;&lt;/sup&gt;</MailService><Rate>7.90</Rate></Postage><Postage CLASSID="977"><MailService>Priority Mail Cubic&lt;sup&gt;&amp;#8482;&lt;/sup&gt;</MailService><Rate>6.50</Rate></Postage></Package></RateV4Response>"#;
        let response: RateV4Response = xml::parse("RateV4Response", raw.as_bytes()).unwrap();
        let estimates = UspsMapper::estimates(response, &UspsCodeTable::new()).unwrap();

        assert_eq!(estimates.len(), 2);
        assert_eq!(estimates[0].service(), "1");
        assert_eq!(estimates[0].name(), "Priority Mail");
        assert_eq!(estimates[0].price(), 7.90);
        assert_eq!(estimates[0].provider(), Provider::Usps);
        assert_eq!(estimates[1].name(), "Priority Mail Cubic");
    }

    #[test]
    fn test_package_error_is_rejected() {
        let raw = r#"<RateV4Response><Package ID="0"><Error><Number>-2147219498</Number><Source>DomesticRatesV3</Source><Description>Please enter a valid ZIP Code for the recipient.</Description></Error></Package></RateV4Response>"#;
        let response: RateV4Response = xml::parse("RateV4Response", raw.as_bytes()).unwrap();

        match UspsMapper::estimates(response, &UspsCodeTable::new()) {
            Err(CarrierError::Rejected { code, message }) => {
                assert_eq!(code, "-2147219498");
                assert!(message.contains("ZIP Code"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_rate_is_parse_error() {
        let raw = r#"<RateV4Response><Package ID="0"><Postage CLASSID="1"><MailService>Priority Mail</MailService><Rate>N/A</Rate></Postage></Package></RateV4Response>"#;
        let response: RateV4Response = xml::parse("RateV4Response", raw.as_bytes()).unwrap();
        assert!(matches!(
            UspsMapper::estimates(response, &UspsCodeTable::new()),
            Err(CarrierError::Parse(_))
        ));
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("Priority Mail Express 2-Day<sup>&#8482;</sup> Hold For Pickup"),
            "Priority Mail Express 2-Day Hold For Pickup"
        );
        assert_eq!(
            strip_markup("USPS Retail Ground&lt;sup&gt;&#8482;&lt;/sup&gt;"),
            "USPS Retail Ground"
        );
    }
}

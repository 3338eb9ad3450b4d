/// Mobile-money payment QR codes
///
/// The payment page shows two QR codes, one per mobile-money provider. Each
/// encodes a USSD dial string that pays the rounded-up grand total to the
/// platform's merchant number. The two codes are produced together or not
/// at all: if either fails to encode, the whole operation fails.
///
/// # Example
///
/// ```
/// use lodge_shared::payment::PaymentQrGenerator;
///
/// # async fn example() -> Result<(), lodge_shared::payment::QrError> {
/// let generator = PaymentQrGenerator::default();
/// let amount = PaymentQrGenerator::rounded_cost(99.01)?;
/// assert_eq!(amount, 100);
///
/// let codes = generator.build(amount).await?;
/// assert!(codes.orange_money.starts_with("data:image/png;base64,"));
/// # Ok(())
/// # }
/// ```

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub const DEFAULT_ORANGE_MONEY_NUMBER: &str = "0770722633";
pub const DEFAULT_MOBILE_MONEY_NUMBER: &str = "0881806488";

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Errors from QR generation
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("Invalid payment amount: {0}")]
    InvalidAmount(String),

    #[error("QR encoding failed: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    #[error("QR rendering failed: {0}")]
    Render(#[from] image::ImageError),

    #[error("QR worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Both payment codes for one booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentQrCodes {
    /// PNG data URL for the Orange Money code
    pub orange_money: String,
    /// PNG data URL for the MTN Mobile Money code
    pub mobile_money: String,
    pub orange_money_payload: String,
    pub mobile_money_payload: String,
}

/// Largest whole amount that survives the `f64` to `i64` conversion exactly
const MAX_EXACT_AMOUNT: f64 = 9_007_199_254_740_992.0;

/// Builds payment QR codes for the configured merchant numbers
#[derive(Debug, Clone)]
pub struct PaymentQrGenerator {
    orange_money_number: String,
    mobile_money_number: String,
}

impl Default for PaymentQrGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ORANGE_MONEY_NUMBER, DEFAULT_MOBILE_MONEY_NUMBER)
    }
}

impl PaymentQrGenerator {
    pub fn new(orange_money_number: impl Into<String>, mobile_money_number: impl Into<String>) -> Self {
        Self {
            orange_money_number: orange_money_number.into(),
            mobile_money_number: mobile_money_number.into(),
        }
    }

    /// Orange Money USSD string: `*144*1*1*{number}*{amount}#`
    pub fn orange_money_payload(&self, amount: i64) -> String {
        format!("*144*1*1*{}*{}#", self.orange_money_number, amount)
    }

    /// MTN Mobile Money USSD string: `*156*1*1*{number}*2*{amount}#`
    pub fn mobile_money_payload(&self, amount: i64) -> String {
        format!("*156*1*1*{}*2*{}#", self.mobile_money_number, amount)
    }

    /// Grand total rounded up to a whole currency unit
    ///
    /// Amounts whose ceiling is not an integer an `f64` holds exactly
    /// (above 2^53) are rejected rather than clamped.
    pub fn rounded_cost(total: f64) -> Result<i64, QrError> {
        if !total.is_finite() || total < 0.0 {
            return Err(QrError::InvalidAmount(total.to_string()));
        }

        let ceiling = total.ceil();
        if ceiling > MAX_EXACT_AMOUNT {
            return Err(QrError::InvalidAmount(total.to_string()));
        }
        Ok(ceiling as i64)
    }

    /// Renders both codes concurrently
    #[instrument(skip(self))]
    pub async fn build(&self, amount: i64) -> Result<PaymentQrCodes, QrError> {
        let orange_money_payload = self.orange_money_payload(amount);
        let mobile_money_payload = self.mobile_money_payload(amount);

        let orange = {
            let payload = orange_money_payload.clone();
            tokio::task::spawn_blocking(move || encode_data_url(&payload))
        };
        let mobile = {
            let payload = mobile_money_payload.clone();
            tokio::task::spawn_blocking(move || encode_data_url(&payload))
        };

        let (orange_money, mobile_money) = tokio::try_join!(orange, mobile)?;
        let orange_money = orange_money?;
        let mobile_money = mobile_money?;

        debug!(amount, "Generated payment QR codes");

        Ok(PaymentQrCodes {
            orange_money,
            mobile_money,
            orange_money_payload,
            mobile_money_payload,
        })
    }
}

/// Encodes `payload` as a QR code PNG wrapped in a data URL
pub fn encode_data_url(payload: &str) -> Result<String, QrError> {
    let code = QrCode::new(payload.as_bytes())?;
    let image = code.render::<Luma<u8>>().build();

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png)))
}

//! User-facing text
//!
//! Defaults are Thai. Templates use `{name}` placeholders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub in_progress: String,
    pub generic_error: String,
    /// Prepended to every inline error
    pub error_prefix: String,
    pub first_name_required: String,
    pub last_name_required: String,
    pub staff_id_format: String,
    pub position_required: String,
    pub division_required: String,
    pub department_required: String,
    pub section_required: String,
    pub location_required: String,
    /// Placeholders: `{staff_id}`, `{timestamp}`
    pub success_detail: String,
    /// Placeholder: `{seconds}`
    pub auto_close: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            in_progress: "โปรดรอสักครู่ ระบบกำลังบันทึกข้อมูล...".to_string(),
            generic_error: "เกิดข้อผิดพลาด".to_string(),
            error_prefix: "❌ ".to_string(),
            first_name_required: "กรุณากรอกชื่อจริง".to_string(),
            last_name_required: "กรุณากรอกนามสกุล".to_string(),
            staff_id_format: "รหัสพนักงานต้องเป็นตัวเลข 5 หลัก".to_string(),
            position_required: "กรุณากรอกตำแหน่ง".to_string(),
            division_required: "กรุณาเลือกฝ่าย".to_string(),
            department_required: "กรุณาเลือกแผนก".to_string(),
            section_required: "กรุณาเลือกส่วนงาน".to_string(),
            location_required: "กรุณาเลือกสถานี".to_string(),
            success_detail: "รหัสพนักงาน: {staff_id}  เวลา: {timestamp}".to_string(),
            auto_close: "หน้าต่างนี้จะปิดอัตโนมัติใน {seconds} วินาที".to_string(),
        }
    }
}

impl Messages {
    /// Text shown in the success dialog body
    pub fn success_detail(&self, staff_id: &str, timestamp: &str) -> String {
        self.success_detail
            .replace("{staff_id}", staff_id)
            .replace("{timestamp}", timestamp)
    }

    /// Countdown line under the success dialog body
    pub fn auto_close(&self, seconds: u32) -> String {
        self.auto_close.replace("{seconds}", &seconds.to_string())
    }

    /// Inline error line, with the generic text substituted for an empty message
    pub fn error_line(&self, message: &str) -> String {
        let message = if message.trim().is_empty() {
            self.generic_error.as_str()
        } else {
            message
        };
        format!("{}{}", self.error_prefix, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_detail_template() {
        let messages = Messages {
            success_detail: "id={staff_id} at {timestamp}".to_string(),
            ..Default::default()
        };
        assert_eq!(
            messages.success_detail("12345", "01/02/2567 03:04:05"),
            "id=12345 at 01/02/2567 03:04:05"
        );
    }

    #[test]
    fn test_auto_close_template() {
        let messages = Messages::default();
        assert!(messages.auto_close(30).contains("30"));
    }

    #[test]
    fn test_error_line_fallback() {
        let messages = Messages::default();
        assert_eq!(messages.error_line("boom"), "❌ boom");
        assert_eq!(messages.error_line("  "), format!("❌ {}", messages.generic_error));
    }
}

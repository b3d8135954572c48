//! Notification email templates.

/// Broadcast reminder sent when the intake pool is empty.
pub fn reminder(spreadsheet_url: &str) -> (String, String) {
    let subject = "GISource提醒：添加内容".to_string();
    let body = format!(
        "亲爱的 GISource 团队成员，\n\n\
         现有资讯消息已全部发送，请您尽快添加/完善内容（{spreadsheet_url}）。\n\n\
         如果您已退出相关工作，请回复本邮件告知我们。"
    );
    (subject, body)
}

/// Targeted notice to the verifier of a posting that failed validation.
pub fn error_notice(
    verifier_name: &str,
    university_cn: &str,
    direction: &str,
    source: &str,
    date: &str,
) -> (String, String) {
    let subject = format!("GISource信息错误提醒 - {date} - {direction}");
    let body = format!(
        "{verifier_name}同学您好，\n\n\
         您填写的 \"{university_cn}-{direction}\" 消息有误，请及时更正。\n\n\
         消息链接：{source}"
    );
    (subject, body)
}

/// Prompt asking the operator to forward the rendered message to the chat.
pub fn chat_prompt(
    recipient_name: &str,
    chat_text: &str,
    direction: &str,
    date: &str,
) -> (String, String) {
    let subject = format!("微信群信息发送通知 - {date} - {direction}");
    let body = format!(
        "{recipient_name}同学您好，\n\n\
         请在确认信息无误后，发送以下信息至微信群。\n\n\n\n\
         {chat_text}"
    );
    (subject, body)
}

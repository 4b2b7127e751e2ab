// src/ai/prompts.rs
// Prompts fixos e esquemas de resposta enviados ao modelo.

use serde_json::{Value, json};

pub const RECEIPT_SYSTEM_PROMPT: &str = "あなたはレシート・領収書の解析専門家です。
画像からレシートや領収書の情報を読み取り、以下の形式のJSONで返してください：
{
  \"date\": \"YYYY-MM-DD\",
  \"amount\": \"数値のみ（カンマなし）\",
  \"vendor\": \"店舗名・業者名\",
  \"category\": \"燃料費/資材費/修理費/その他\",
  \"confidence\": 0.0-1.0の信頼度
}

漁業関連の用語（燃料、網、ロープ、氷、修理等）に注意して分類してください。";

pub const RECEIPT_USER_PROMPT: &str = "このレシート・領収書の情報を解析してください";

pub const FISH_SYSTEM_PROMPT: &str = "あなたは漁業専門の魚種識別エキスパートです。
画像から魚の種類と推定重量を分析し、以下の形式のJSONで返してください：
{
  \"fishSpecies\": \"魚種名（日本語）\",
  \"quantity\": \"推定重量（例：10.5kg）\",
  \"confidence\": 0.0-1.0の信頼度
}

日本の一般的な魚種（マダイ、スズキ、イサキ、アジ、サバ、イワシなど）を識別してください。
重量は魚の大きさから推定してください。";

pub const FISH_USER_PROMPT: &str = "この魚の種類と推定重量を教えてください";

pub const ADVICE_SYSTEM_PROMPT: &str = "あなたは漁業経営の専門アドバイザーです。
篠島の漁業者に対して、経営データに基づいた実践的なアドバイスを日本語で提供してください。
以下の点に注意してください：
- 具体的で実行可能な提案をする
- 漁業業界の慣行を考慮する
- コスト削減と収益向上の両面から助言する
- 高齢の利用者にもわかりやすい言葉で説明する";

/// Devolvido quando o modelo responde sem texto algum.
pub const ADVICE_FALLBACK: &str = "申し訳ございませんが、アドバイスの生成に失敗しました。";

pub fn advice_prompt(question: &str, business_data: &Value) -> String {
    let data = serde_json::to_string_pretty(business_data).unwrap_or_else(|_| "{}".to_string());
    format!(
        "質問: {question}\n\n経営データ:\n{data}\n\n上記のデータを参考に、具体的なアドバイスをお願いします。"
    )
}

pub fn receipt_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "date": { "type": "string" },
            "amount": { "type": "string" },
            "vendor": { "type": "string" },
            "category": { "type": "string" },
            "confidence": { "type": "number" }
        },
        "required": ["date", "amount", "vendor", "category", "confidence"]
    })
}

pub fn fish_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "fishSpecies": { "type": "string" },
            "quantity": { "type": "string" },
            "confidence": { "type": "number" }
        },
        "required": ["fishSpecies", "quantity", "confidence"]
    })
}

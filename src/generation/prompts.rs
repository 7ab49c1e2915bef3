/*!
 * Prompt template for example-dialogue generation.
 *
 * The prompt asks for a four-line A/B/A/B dialogue using the target reading,
 * ruby-annotated, followed directly by four translation lines.
 */

use crate::kanji::KanjiCandidate;

/// Dialogue generation prompt with placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Placeholders: {kanji}, {reading_type}, {pronounce}, {translation_language}
    pub const EXAMPLE_DIALOGUE: &'static str = r#"{kanji}를 {reading_type}독으로 {pronounce}라고 읽었을 때의 일본어 예문을 만들려고 한다.
예문은 두 화자가 A, B, A, B 순서로 주고받는 4줄의 대화이다.
화자 이름은 적지 않고 줄바꿈으로만 대사를 구분한다.

# 요미가나 표기
한자 단어는 <ruby> 태그로 감싸고, 한자 뒤에 <rt> 태그로 요미가나를 적는다.
예시: <ruby>読<rt>よみ</rt></ruby><ruby>仮名<rt>がな</rt></ruby>
한자가 아닌 부분에는 ruby 태그, rt 태그, 요미가나를 붙이지 않는다.

# 번역
일본어 대사 4줄 바로 다음 줄부터 {translation_language}로 번역을 4줄 적는다.
따라서 일본어 4줄과 번역 4줄, 총 8줄이 출력되어야 한다.

# 주의사항
중간에 빈 줄을 넣지 않는다.
문장 앞뒤에 「」나 " 같은 따옴표를 붙이지 않는다.
대사와 번역 외의 텍스트는 절대 출력하지 않는다.

# 예시
この<ruby>箱<rt>はこ</rt></ruby>の<ruby>中<rt>なか</rt></ruby>には、いくつ<ruby>入<rt>はい</rt></ruby>ってるだろう？
ええと、<ruby>一<rt>ひと</rt></ruby>つ、<ruby>二<rt>ふた</rt></ruby>つ…あ、<ruby>六<rt>むっ</rt></ruby>つだね。
<ruby>六<rt>むっ</rt></ruby>つか、ちょうどいい<ruby>数<rt>かず</rt></ruby>だね。
うん、<ruby>三人<rt>さんにん</rt></ruby>で<ruby>二<rt>ふた</rt></ruby>つずつ<ruby>分<rt>わ</rt></ruby>けられる。
이 상자 안에는 몇 개가 들어있을까?
어디 보자, 하나, 둘… 아, 여섯 개네.
여섯 개인가, 딱 좋은 숫자네.
응, 세 명이서 두 개씩 나눌 수 있겠다."#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    pub fn example_dialogue() -> Self {
        Self::new(Self::EXAMPLE_DIALOGUE)
    }

    /// Render the template for a target reading
    pub fn render(&self, target: &KanjiCandidate, translation_language: &str) -> String {
        self.template
            .replace("{kanji}", &target.kanji)
            .replace("{reading_type}", target.reading_type.korean_label())
            .replace("{pronounce}", &target.pronounce)
            .replace("{translation_language}", translation_language)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::example_dialogue()
    }
}

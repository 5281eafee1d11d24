//! Two-language message catalog. The ko strings are the product's primary
//! voice; en is the fallback for non-Korean browsers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ko,
    En,
}

impl Language {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "ko" => Some(Self::Ko),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    // Common
    Ok,
    Cancel,
    Save,
    Loading,
    // Home
    AppTitle,
    SearchDiaries,
    EditProfile,
    NewDiary,
    SearchPlaceholder,
    SearchNoResults,
    SearchTryOther,
    NoDiaries,
    CreateFirstCharacter,
    LoadingDiaries,
    DeleteConfirm,
    DeleteFailed,
    // Profile
    ProfileTitle,
    Username,
    Email,
    Logout,
    Withdraw,
    WithdrawConfirm,
    WithdrawFailed,
    UpdateFailed,
    ProfileUpdated,
    RegenImage,
    RegenFailed,
    ChangeCharacterSettings,
    // Character creation
    CreateCharacterTitle,
    Gender,
    Female,
    Male,
    HairStyle,
    HairLong,
    HairMedium,
    HairShort,
    Others,
    Glasses,
    Freckles,
    GenerateCharacter,
    Generating,
    Regen,
    SaveCharacter,
    CharacterCreationDescription,
    CharacterLikeIt,
    CharacterSaveOrRegen,
    CharacterGenFailed,
    CharacterSaveFailed,
    // Write & style
    HowWasDay,
    WriteStory,
    WritePlaceholder,
    CharsCount,
    TurnIntoComic,
    ChooseStyle,
    StyleCute,
    StyleComedy,
    StyleDrama,
    StyleSimple,
    StyleCuteDesc,
    StyleComedyDesc,
    StyleDramaDesc,
    StyleSimpleDesc,
    GenerateComic,
    GenStartFailed,
    // Generating & result
    CreatingComic,
    PleaseWait,
    GenerationFailed,
    YourComic,
    TodayDiary,
    Regenerate,
    SaveShare,
    Saved,
    RegenStartFailed,
    // Auth
    SignInTitle,
    SignUpTitle,
    Welcome,
    WelcomeBack,
    CreateAccount,
    Password,
    ConfirmPassword,
    PasswordMismatch,
    AlreadyHaveAccount,
    NoAccount,
    RegisterSuccess,
    RegistrationFailed,
    InvalidAuth,
}

/// Localized text for `key`. Unknown keys cannot exist; the enum is the
/// catalog.
#[must_use]
pub fn text(language: Language, key: MessageKey) -> &'static str {
    let (ko, en) = pair(key);
    match language {
        Language::Ko => ko,
        Language::En => en,
    }
}

fn pair(key: MessageKey) -> (&'static str, &'static str) {
    use MessageKey as K;
    match key {
        K::Ok => ("확인", "OK"),
        K::Cancel => ("취소", "Cancel"),
        K::Save => ("저장", "Save"),
        K::Loading => ("불러오는 중...", "Loading..."),

        K::AppTitle => ("만화 일기", "Cartoon Diary"),
        K::SearchDiaries => ("일기 검색", "Search Diaries"),
        K::EditProfile => ("프로필 수정", "Edit Profile"),
        K::NewDiary => ("새 일기", "New Diary"),
        K::SearchPlaceholder => ("일기 내용 검색...", "Search diaries..."),
        K::SearchNoResults => ("검색 결과가 없습니다.", "No search results."),
        K::SearchTryOther => ("다른 키워드로 검색해 보세요.", "Try other keywords."),
        K::NoDiaries => ("등록된 일기가 없습니다.", "No diaries yet."),
        K::CreateFirstCharacter => (
            "첫번째로 당신의 캐릭터를 만드세요",
            "Create your first character",
        ),
        K::LoadingDiaries => ("일기를 불러오는 중...", "Loading diaries..."),
        K::DeleteConfirm => (
            "정말로 이 일기를 삭제하시겠습니까? 이 작업은 되돌릴 수 없습니다.",
            "Are you sure you want to delete this diary? This cannot be undone.",
        ),
        K::DeleteFailed => ("일기 삭제에 실패했습니다.", "Failed to delete diary."),

        K::ProfileTitle => ("사용자 프로필", "User Profile"),
        K::Username => ("사용자 이름", "Username"),
        K::Email => ("이메일", "Email"),
        K::Logout => ("로그아웃", "Log Out"),
        K::Withdraw => ("계정 탈퇴", "Withdraw (Delete Account)"),
        K::WithdrawConfirm => (
            "정말로 계정을 삭제하시겠습니까? 이 작업은 되돌릴 수 없습니다.",
            "Are you sure you want to delete your account? This cannot be undone.",
        ),
        K::WithdrawFailed => ("계정 삭제에 실패했습니다.", "Failed to delete account."),
        K::UpdateFailed => ("프로필 수정에 실패했습니다.", "Failed to update profile."),
        K::ProfileUpdated => ("프로필이 수정되었습니다!", "Profile updated successfully!"),
        K::RegenImage => (
            "이미지 새로 고치기 (재생성)",
            "Refresh Image (Regenerate)",
        ),
        K::RegenFailed => (
            "캐릭터 재생성에 실패했습니다.",
            "Failed to regenerate character.",
        ),
        K::ChangeCharacterSettings => (
            "캐릭터 설정(성별, 머리 등) 변경하기",
            "Change character settings (gender, hair, etc.)",
        ),

        K::CreateCharacterTitle => ("캐릭터 생성", "Create Character"),
        K::Gender => ("성별", "Gender"),
        K::Female => ("여성", "Female"),
        K::Male => ("남성", "Male"),
        K::HairStyle => ("머리 스타일", "Hair Style"),
        K::HairLong => ("긴 머리", "Long Hair"),
        K::HairMedium => ("짧은 머리", "Medium Hair"),
        K::HairShort => ("쇼컷", "Short Hair"),
        K::Others => ("기타", "Others"),
        K::Glasses => ("안경", "Glasses"),
        K::Freckles => ("주근깨", "Freckles"),
        K::GenerateCharacter => ("캐릭터 만들기", "Create Character"),
        K::Generating => ("생성 중...", "Generating..."),
        K::Regen => ("다시 생성", "Regenerate"),
        K::SaveCharacter => ("저장하기", "Save Character"),
        K::CharacterCreationDescription => (
            "당신의 이야기 속 주인공을 설정해주세요.",
            "Please set the protagonist of your story.",
        ),
        K::CharacterLikeIt => ("마음에 드시나요?", "Do you like it?"),
        K::CharacterSaveOrRegen => (
            "캐릭터를 저장하거나 다시 생성해보세요.",
            "Save the character or try regenerating.",
        ),
        K::CharacterGenFailed => (
            "캐릭터 생성에 실패했습니다. 다시 시도해 주세요.",
            "Failed to generate character. Please try again.",
        ),
        K::CharacterSaveFailed => (
            "캐릭터 저장에 실패했습니다. 다시 시도해 주세요.",
            "Failed to save character. Please try again.",
        ),

        K::HowWasDay => ("오늘 하루는 어땠나요?", "How was your day?"),
        K::WriteStory => ("오늘의 이야기를 들려주세요", "Write your story"),
        K::WritePlaceholder => ("무슨 일이 있었나요?", "What happened today?"),
        K::CharsCount => ("자", "chars"),
        K::TurnIntoComic => ("만화로 만들기", "Turn into a Comic"),
        K::ChooseStyle => ("스타일 선택", "Choose a Style"),
        K::StyleCute => ("귀여운", "Cute"),
        K::StyleComedy => ("코미디", "Comedy"),
        K::StyleDrama => ("드라마", "Drama"),
        K::StyleSimple => ("심플한", "Simple"),
        K::StyleCuteDesc => ("부드럽고 사랑스러운", "Soft & Adorable"),
        K::StyleComedyDesc => ("웃기고 과장된", "Funny & Exaggerated"),
        K::StyleDramaDesc => ("진지하고 감성적인", "Serious & Emotional"),
        K::StyleSimpleDesc => ("깔끔하고 명료한", "Clean & Simple"),
        K::GenerateComic => ("만화 생성하기", "Generate Comic"),
        K::GenStartFailed => (
            "일기 생성 시작에 실패했습니다.",
            "Failed to start generation.",
        ),

        K::CreatingComic => ("만화를 만들고 있어요...", "Creating your comic..."),
        K::PleaseWait => ("잠시만 기다려 주세요...", "Please wait..."),
        K::GenerationFailed => ("만화 생성에 실패했습니다.", "Comic generation failed."),
        K::YourComic => ("나의 만화", "Your Comic"),
        K::TodayDiary => ("오늘의 일기", "Today's Diary"),
        K::Regenerate => ("재생성", "Regenerate"),
        K::SaveShare => ("저장 및 공유", "Save & Share"),
        K::Saved => ("저장되었습니다!", "Saved!"),
        K::RegenStartFailed => (
            "재생성 시작에 실패했습니다.",
            "Failed to start regeneration.",
        ),

        K::SignInTitle => ("로그인", "Sign In"),
        K::SignUpTitle => ("회원가입", "Sign Up"),
        K::Welcome => ("환영합니다!", "Welcome!"),
        K::WelcomeBack => ("다시 오신 것을 환영합니다", "Welcome Back"),
        K::CreateAccount => ("계정 만들기", "Create Account"),
        K::Password => ("비밀번호", "Password"),
        K::ConfirmPassword => ("비밀번호 확인", "Confirm Password"),
        K::PasswordMismatch => (
            "비밀번호가 일치하지 않습니다.",
            "Passwords do not match",
        ),
        K::AlreadyHaveAccount => ("이미 계정이 있으신가요?", "Already have an account?"),
        K::NoAccount => ("계정이 없으신가요?", "Don't have an account?"),
        K::RegisterSuccess => (
            "회원가입이 완료되었습니다! 환영합니다.",
            "Registration successful! Welcome.",
        ),
        K::RegistrationFailed => ("회원가입에 실패했습니다.", "Registration failed."),
        K::InvalidAuth => (
            "아이디 또는 비밀번호가 잘못되었습니다.",
            "Invalid username or password.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_round_trip() {
        assert_eq!(Language::parse("ko"), Some(Language::Ko));
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::Ko.as_str(), "ko");
    }

    #[test]
    fn default_language_is_korean() {
        assert_eq!(Language::default(), Language::Ko);
    }

    #[test]
    fn catalog_switches_with_language() {
        assert_eq!(text(Language::Ko, MessageKey::AppTitle), "만화 일기");
        assert_eq!(text(Language::En, MessageKey::AppTitle), "Cartoon Diary");
        assert_eq!(
            text(Language::En, MessageKey::PasswordMismatch),
            "Passwords do not match"
        );
    }
}

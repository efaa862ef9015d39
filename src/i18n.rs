//! Message lookup for the two supported locales.

use leptos::prelude::*;

/// Supported page locales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
	/// English, left-to-right.
	#[default]
	En,
	/// Arabic, right-to-left.
	Ar,
}

impl Locale {
	/// Parse a route or `lang` tag. Unknown tags fall back to English.
	pub fn from_tag(tag: &str) -> Self {
		match tag.trim().to_ascii_lowercase().as_str() {
			"ar" | "ar-sa" => Locale::Ar,
			_ => Locale::En,
		}
	}

	pub fn tag(self) -> &'static str {
		match self {
			Locale::En => "en",
			Locale::Ar => "ar",
		}
	}

	pub fn is_rtl(self) -> bool {
		matches!(self, Locale::Ar)
	}

	pub fn dir(self) -> &'static str {
		if self.is_rtl() { "rtl" } else { "ltr" }
	}

	/// The other locale, for the language switcher.
	pub fn toggled(self) -> Self {
		match self {
			Locale::En => Locale::Ar,
			Locale::Ar => Locale::En,
		}
	}
}

/// Every user-facing string the app renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Msg {
	HeroTitle,
	HeroSubtitle,
	WorkflowTitle,
	WorkflowSubtitle,
	PaletteTitle,
	PaletteHint,
	CategoryServices,
	CategoryInfrastructure,
	CategoryConnections,
	Nodes,
	Connections,
	ClearAll,
	Expand,
	BackToHome,
	ZoomIn,
	ZoomOut,
	FitView,
	DropHint,
	DropHintSub,
	ConnectingHint,
	ConnectHelp,
	RemoveHelp,
	SwitchLanguage,
	ToggleTheme,
	NotFoundTitle,
	NotFoundBody,
	CloudLabel,
	CloudDescription,
	DatabaseLabel,
	DatabaseDescription,
	AiLabel,
	AiDescription,
	ApiLabel,
	ApiDescription,
	ServerLabel,
	ServerDescription,
	SecurityLabel,
	SecurityDescription,
	AutomationLabel,
	AutomationDescription,
	ContainerLabel,
	ContainerDescription,
	UnknownLabel,
}

/// Look up the display text of `msg` in `locale`.
pub fn t(locale: Locale, msg: Msg) -> &'static str {
	match locale {
		Locale::En => en(msg),
		Locale::Ar => ar(msg),
	}
}

fn en(msg: Msg) -> &'static str {
	match msg {
		Msg::HeroTitle => "Fintech infrastructure, designed with you",
		Msg::HeroSubtitle => "Sketch your architecture: drag services onto the board and connect them.",
		Msg::WorkflowTitle => "Workflow Builder",
		Msg::WorkflowSubtitle => "Drag components to build your architecture",
		Msg::PaletteTitle => "Components",
		Msg::PaletteHint => "Drag to add to canvas",
		Msg::CategoryServices => "Services",
		Msg::CategoryInfrastructure => "Infrastructure",
		Msg::CategoryConnections => "Connections",
		Msg::Nodes => "Nodes",
		Msg::Connections => "Connections",
		Msg::ClearAll => "Clear All",
		Msg::Expand => "Open full editor",
		Msg::BackToHome => "Back to home",
		Msg::ZoomIn => "Zoom in",
		Msg::ZoomOut => "Zoom out",
		Msg::FitView => "Fit view",
		Msg::DropHint => "Drop components here",
		Msg::DropHintSub => "Drag items from the sidebar to start building",
		Msg::ConnectingHint => "Click another node to connect, or click the same node to cancel",
		Msg::ConnectHelp => "Click a node's handle, then another node, to connect",
		Msg::RemoveHelp => "Hover and click × to remove",
		Msg::SwitchLanguage => "العربية",
		Msg::ToggleTheme => "Toggle theme",
		Msg::NotFoundTitle => "Page not found",
		Msg::NotFoundBody => "The page you are looking for does not exist.",
		Msg::CloudLabel => "Cloud Service",
		Msg::CloudDescription => "Scalable cloud infrastructure",
		Msg::DatabaseLabel => "Database",
		Msg::DatabaseDescription => "Secure data storage",
		Msg::AiLabel => "AI Engine",
		Msg::AiDescription => "Machine learning models",
		Msg::ApiLabel => "API Gateway",
		Msg::ApiDescription => "API management & routing",
		Msg::ServerLabel => "Server",
		Msg::ServerDescription => "Compute resources",
		Msg::SecurityLabel => "Security",
		Msg::SecurityDescription => "Protection & encryption",
		Msg::AutomationLabel => "Automation",
		Msg::AutomationDescription => "Workflow automation",
		Msg::ContainerLabel => "Container",
		Msg::ContainerDescription => "Containerized applications",
		Msg::UnknownLabel => "Component",
	}
}

fn ar(msg: Msg) -> &'static str {
	match msg {
		Msg::HeroTitle => "بنية تقنية مالية نصممها معك",
		Msg::HeroSubtitle => "ارسم بنيتك: اسحب الخدمات إلى اللوحة واربط بينها.",
		Msg::WorkflowTitle => "منشئ سير العمل",
		Msg::WorkflowSubtitle => "اسحب المكونات لبناء بنيتك",
		Msg::PaletteTitle => "المكونات",
		Msg::PaletteHint => "اسحب للإضافة إلى اللوحة",
		Msg::CategoryServices => "الخدمات",
		Msg::CategoryInfrastructure => "البنية التحتية",
		Msg::CategoryConnections => "الاتصالات",
		Msg::Nodes => "العقد",
		Msg::Connections => "الروابط",
		Msg::ClearAll => "مسح الكل",
		Msg::Expand => "فتح المحرر الكامل",
		Msg::BackToHome => "العودة للرئيسية",
		Msg::ZoomIn => "تكبير",
		Msg::ZoomOut => "تصغير",
		Msg::FitView => "ملاءمة العرض",
		Msg::DropHint => "أفلت المكونات هنا",
		Msg::DropHintSub => "اسحب العناصر من الشريط الجانبي للبدء",
		Msg::ConnectingHint => "انقر على عقدة أخرى للربط، أو على نفس العقدة للإلغاء",
		Msg::ConnectHelp => "انقر على مقبض العقدة ثم على عقدة أخرى للربط",
		Msg::RemoveHelp => "مرر المؤشر وانقر × للحذف",
		Msg::SwitchLanguage => "English",
		Msg::ToggleTheme => "تبديل المظهر",
		Msg::NotFoundTitle => "الصفحة غير موجودة",
		Msg::NotFoundBody => "الصفحة التي تبحث عنها غير موجودة.",
		Msg::CloudLabel => "خدمة سحابية",
		Msg::CloudDescription => "بنية سحابية قابلة للتوسع",
		Msg::DatabaseLabel => "قاعدة بيانات",
		Msg::DatabaseDescription => "تخزين آمن للبيانات",
		Msg::AiLabel => "محرك ذكاء اصطناعي",
		Msg::AiDescription => "نماذج تعلم الآلة",
		Msg::ApiLabel => "بوابة API",
		Msg::ApiDescription => "إدارة وتوجيه الواجهات",
		Msg::ServerLabel => "خادم",
		Msg::ServerDescription => "موارد الحوسبة",
		Msg::SecurityLabel => "الأمان",
		Msg::SecurityDescription => "الحماية والتشفير",
		Msg::AutomationLabel => "الأتمتة",
		Msg::AutomationDescription => "أتمتة سير العمل",
		Msg::ContainerLabel => "حاوية",
		Msg::ContainerDescription => "تطبيقات بالحاويات",
		Msg::UnknownLabel => "مكوّن",
	}
}

/// The active locale, provided at the app root.
pub fn use_locale() -> RwSignal<Locale> {
	expect_context::<RwSignal<Locale>>()
}

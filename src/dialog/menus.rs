//! Fixed screen texts (pt-AO)

pub const MAIN_MENU: &str = "Bem-vindo ao Alerta Saúde\n\
1. Zonas de risco\n\
2. Relatos por município\n\
3. Avaliar sintomas de malária\n\
4. Reportar problema na zona\n\
5. Dicas de saúde\n\
6. Contactos de emergência";

pub const RISK_LEVEL_PROMPT: &str = "Escolha o nível de risco:\n\
1. Alto\n\
2. Médio\n\
3. Baixo\n\
4. Todos\n\
5. Voltar";

/// Risk filters in option order, as labels
pub const RISK_LEVELS: [&str; 3] = ["alto", "médio", "baixo"];

pub const MUNICIPALITY_PROMPT: &str = "Escolha o município:\n\
1. Cazenga\n\
2. Cacuaco\n\
3. Viana\n\
4. Outro\n\
5. Todos\n\
6. Voltar";

/// Municipality filters for options 1-5 of [`MUNICIPALITY_PROMPT`]
pub const MUNICIPALITIES: [&str; 5] = ["Cazenga", "Cacuaco", "Viana", "Outro", "Todos"];

pub const SYMPTOMS_PROMPT: &str = "Descreva os seus sintomas (ex: febre, dores de cabeça, calafrios):";

pub const ZONE_PROBLEM_PROMPT: &str = "Descreva o problema na sua zona (ex: lixo, água parada):";

pub const HEALTH_TIPS_MENU: &str = "Dicas de saúde:\n\
1. Prevenção da malária\n\
2. Água potável\n\
3. Prevenção da cólera\n\
4. Voltar";

/// Tips for options 1-3 of [`HEALTH_TIPS_MENU`]
pub const HEALTH_TIPS: [&str; 3] = [
    "Durma com mosquiteiro, elimine água parada e procure o centro de saúde ao primeiro sinal de febre.",
    "Ferva ou trate a água com lixívia antes de beber e guarde-a em recipientes tapados.",
    "Lave as mãos com sabão, coza bem os alimentos e use apenas água tratada.",
];

pub const EMERGENCY_CONTACTS: &str = "Contactos de emergência:\n\
Ambulância: 112\n\
Polícia: 113\n\
Bombeiros: 115\n\
Linha da Saúde: 111";

pub const INVALID_SELECTION: &str = "Seleção inválida.";

pub const MISSING_SYMPTOMS: &str = "Por favor, forneça uma descrição dos sintomas.";

pub const MISSING_ZONE_PROBLEM: &str = "Por favor, forneça uma descrição do problema.";

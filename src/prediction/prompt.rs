use crate::prediction::PredictionRequest;

/// Renders the user message sent to the provider. Fields are embedded as-is.
pub fn build_prompt(request: &PredictionRequest) -> String {
    format!(
        "\nYou are a helpful assistant that provides caste and category predictions for Indian \
surnames for educational and research purposes.\n\
\n\
Given the following information:\n\
Name: {name}\n\
Surname: {surname}\n\
Place of Origin: {place}\n\
\n\
Please respond in this compact format:\n\
Caste: [predicted caste]\n\
Category: [General/OBC/SC/ST]\n\
Brief Info: One or two lines explaining why this prediction was made based on surname and \
region. Avoid lengthy explanations. This is a prediction and may not be fully accurate.\n",
        name = request.name,
        surname = request.surname,
        place = request.place_of_origin,
    )
}
